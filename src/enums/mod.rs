pub mod ai_provider_error;
pub mod predicate_kind;
pub mod source_language;
