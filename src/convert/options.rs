use crate::annotations::AnnotationKeys;

/// Knobs for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Annotation key scheme stamped on converted nodes.
    pub annotation_keys: AnnotationKeys,
    /// Stamp source line spans on converted statements, members and expressions.
    pub source_mapping: bool,
    /// Leave implicitly typed locals implicit (`Dim x = 1`, `var x = 1`)
    /// instead of writing out the bound type.
    pub infer_local_types: bool,
    /// Run the validator over the converted tree.
    pub validate: bool,
    /// Visual Basic target only: forbid implicit narrowing conversions.
    pub option_strict: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            annotation_keys: AnnotationKeys::default(),
            source_mapping: true,
            infer_local_types: false,
            validate: true,
            option_strict: true,
        }
    }
}

impl ConversionOptions {
    pub fn with_annotation_keys(mut self, keys: AnnotationKeys) -> Self {
        self.annotation_keys = keys;
        self
    }

    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn without_source_mapping(mut self) -> Self {
        self.source_mapping = false;
        self
    }

    pub fn inferring_local_types(mut self) -> Self {
        self.infer_local_types = true;
        self
    }

    pub fn with_option_strict(mut self, option_strict: bool) -> Self {
        self.option_strict = option_strict;
        self
    }
}
