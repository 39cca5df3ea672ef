use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    Required,
    Conditional,
    Ok,
}

impl RequirementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequirementStatus::Required => "required",
            RequirementStatus::Conditional => "conditional",
            RequirementStatus::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCategory {
    Income,
    General,
    Assets,
    Credit,
}

impl RequirementCategory {
    pub const ALL: [RequirementCategory; 4] = [
        RequirementCategory::Income,
        RequirementCategory::General,
        RequirementCategory::Assets,
        RequirementCategory::Credit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RequirementCategory::Income => "income",
            RequirementCategory::General => "general",
            RequirementCategory::Assets => "assets",
            RequirementCategory::Credit => "credit",
        }
    }
}

/// A document the underwriter still needs, with the rule's justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequirement {
    /// Content-derived identifier, stable across runs for the same deal.
    pub id: String,
    pub name: String,
    pub status: RequirementStatus,
    pub reason: String,
    pub category: RequirementCategory,
}

/// The four ordered checklist sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementBuckets {
    pub income: Vec<DocumentRequirement>,
    pub general: Vec<DocumentRequirement>,
    pub assets: Vec<DocumentRequirement>,
    pub credit: Vec<DocumentRequirement>,
}

impl RequirementBuckets {
    pub fn bucket(&self, category: RequirementCategory) -> &[DocumentRequirement] {
        match category {
            RequirementCategory::Income => &self.income,
            RequirementCategory::General => &self.general,
            RequirementCategory::Assets => &self.assets,
            RequirementCategory::Credit => &self.credit,
        }
    }

    fn bucket_mut(&mut self, category: RequirementCategory) -> &mut Vec<DocumentRequirement> {
        match category {
            RequirementCategory::Income => &mut self.income,
            RequirementCategory::General => &mut self.general,
            RequirementCategory::Assets => &mut self.assets,
            RequirementCategory::Credit => &mut self.credit,
        }
    }

    /// All requirements in section order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentRequirement> {
        RequirementCategory::ALL
            .into_iter()
            .flat_map(move |category| self.bucket(category).iter())
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.general.len() + self.assets.len() + self.credit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_with_status(&self, status: RequirementStatus) -> usize {
        self.iter().filter(|item| item.status == status).count()
    }
}

/// Accumulates requirements for one evaluation, skipping `(name, reason)` repeats.
#[derive(Debug, Default)]
pub(crate) struct ChecklistBuilder {
    buckets: RequirementBuckets,
}

impl ChecklistBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn required(
        &mut self,
        category: RequirementCategory,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> bool {
        self.push(category, RequirementStatus::Required, name, reason)
    }

    pub(crate) fn conditional(
        &mut self,
        category: RequirementCategory,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> bool {
        self.push(category, RequirementStatus::Conditional, name, reason)
    }

    pub(crate) fn satisfied(
        &mut self,
        category: RequirementCategory,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> bool {
        self.push(category, RequirementStatus::Ok, name, reason)
    }

    /// Returns `false` when an identical item already exists in the bucket.
    pub(crate) fn push(
        &mut self,
        category: RequirementCategory,
        status: RequirementStatus,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> bool {
        let name = name.into();
        let reason = reason.into();
        let bucket = self.buckets.bucket_mut(category);

        if bucket
            .iter()
            .any(|existing| existing.name == name && existing.reason == reason)
        {
            return false;
        }

        let id = requirement_id(category, &name, &reason);
        bucket.push(DocumentRequirement {
            id,
            name,
            status,
            reason,
            category,
        });
        true
    }

    pub(crate) fn finish(self) -> RequirementBuckets {
        self.buckets
    }
}

/// Unique within a run because `(name, reason)` is unique per bucket.
fn requirement_id(category: RequirementCategory, name: &str, reason: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"requirement-v1:");
    hasher.update(category.label().as_bytes());
    hasher.update(b"|");
    hasher.update(name.as_bytes());
    hasher.update(b"|");
    hasher.update(reason.as_bytes());
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_skips_identical_name_and_reason() {
        let mut builder = ChecklistBuilder::new();
        assert!(builder.required(RequirementCategory::Credit, "LOE", "Bankruptcy"));
        assert!(!builder.required(RequirementCategory::Credit, "LOE", "Bankruptcy"));
        assert!(builder.required(RequirementCategory::Credit, "LOE", "Foreclosure"));
        assert!(builder.required(RequirementCategory::General, "LOE", "Bankruptcy"));

        let buckets = builder.finish();
        assert_eq!(buckets.credit.len(), 2);
        assert_eq!(buckets.general.len(), 1);
        assert_eq!(buckets.len(), 3);
    }

    #[test]
    fn ids_are_stable_and_content_derived() {
        let first = requirement_id(RequirementCategory::Income, "W-2", "Base income");
        assert_eq!(first, requirement_id(RequirementCategory::Income, "W-2", "Base income"));
        assert_eq!(first.len(), 16);
        assert_ne!(first, requirement_id(RequirementCategory::Income, "W-2", "Bonus income"));
        assert_ne!(first, requirement_id(RequirementCategory::Assets, "W-2", "Base income"));
    }

    #[test]
    fn iter_walks_sections_in_fixed_order() {
        let mut builder = ChecklistBuilder::new();
        builder.conditional(RequirementCategory::Credit, "c", "r");
        builder.satisfied(RequirementCategory::Income, "i", "r");
        builder.required(RequirementCategory::Assets, "a", "r");

        let buckets = builder.finish();
        let names: Vec<&str> = buckets.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["i", "a", "c"]);
        assert_eq!(buckets.count_with_status(RequirementStatus::Required), 1);
    }
}
