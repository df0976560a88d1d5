pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as collection_get;
pub use collection::post as collection_post;

pub use record::delete as record_delete;
pub use record::get as record_get;
pub use record::patch_last_watered as record_patch_last_watered;
pub use record::patch_name as record_patch_name;

pub(crate) const NAME_LENGTH: (usize, usize) = (3, 50);

/// Non-blank plant name
pub(crate) fn validate_name_present(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Plant name cannot be empty".to_string());
    }
    Ok(())
}

/// Non-blank plant name within the rename length bounds
pub(crate) fn validate_name_length(name: &str) -> Result<(), String> {
    validate_name_present(name)?;

    let (min, max) = NAME_LENGTH;
    let len = name.chars().count();
    if len < min || len > max {
        return Err(format!("Plant name must be between {} and {} characters", min, max));
    }
    Ok(())
}
