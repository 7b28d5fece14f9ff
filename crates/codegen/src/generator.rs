use crate::record::RawCatalogRecord;
use crate::registry::CodeRegistry;
use crate::rules::{CategoryRule, CodeParts};

/// Result of assigning a code to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAssignment {
    pub rule: CategoryRule,
    /// Code before disambiguation.
    pub base_code: String,
    /// Final, run-unique code.
    pub code: String,
}

impl CodeAssignment {
    /// Unrecognized categories get a generic code and need a human look.
    pub fn needs_review(&self) -> bool {
        !self.rule.is_recognized()
    }

    pub fn was_disambiguated(&self) -> bool {
        self.base_code != self.code
    }
}

/// Base code for a record, independent of any run state.
pub fn base_code(record: &RawCatalogRecord) -> (CategoryRule, CodeParts) {
    let rule = CategoryRule::classify(record.category(), record.subcategory());
    let parts = rule.code_parts(record);
    (rule, parts)
}

/// One code-generation run.
///
/// Records are processed in the order they are passed; ties between equal base
/// codes are broken in that order, so a fixed batch in a fixed order always
/// yields the same codes.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    registry: CodeRegistry,
}

impl CodeGenerator {
    /// Start a run with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, record: &RawCatalogRecord) -> CodeAssignment {
        let (rule, parts) = base_code(record);
        let base_code = parts.base_code();

        if !rule.is_recognized() {
            tracing::warn!(
                name = %record.name,
                category = record.category(),
                subcategory = record.subcategory(),
                "unrecognized category, using generic code"
            );
        }

        let code = self.registry.register(&base_code);
        if code != base_code {
            tracing::debug!(base = %base_code, code = %code, "base code collision, suffixed");
        }

        CodeAssignment {
            rule,
            base_code,
            code,
        }
    }

    /// Final code for `record`.
    pub fn generate(&mut self, record: &RawCatalogRecord) -> String {
        self.assign(record).code
    }

    /// Fresh run over a whole batch, in input order.
    pub fn generate_batch(records: &[RawCatalogRecord]) -> Vec<CodeAssignment> {
        let mut generator = Self::new();
        records.iter().map(|r| generator.assign(r)).collect()
    }

    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }
}
