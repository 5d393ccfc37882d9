use crate::error::internal::InternalError;

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed string to `u64`
/// - `Err(InternalError::ParseStringId)` - Failed to parse the string as a u64
pub fn parse_u64_from_string(value: &str) -> Result<u64, InternalError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })
}

/// Parses a Discord snowflake stored as a string.
///
/// Serenity's id constructors panic on zero, so zero is rejected here.
///
/// # Returns
/// - `Ok(u64)` - Non-zero id
/// - `Err(InternalError::ParseStringId)` - Not a number
/// - `Err(InternalError::InvalidSnowflake)` - Parsed to zero
pub fn parse_snowflake(value: &str) -> Result<u64, InternalError> {
    match parse_u64_from_string(value)? {
        0 => Err(InternalError::InvalidSnowflake {
            value: value.to_string(),
        }),
        id => Ok(id),
    }
}
