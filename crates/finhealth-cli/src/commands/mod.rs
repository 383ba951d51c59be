pub mod insurance;
pub mod planning;
pub mod scoring;
pub mod tax;

use serde::de::DeserializeOwned;

use crate::input;

/// A typed input from `--input` or piped stdin, if either was supplied.
pub(crate) fn read_input<T: DeserializeOwned>(
    path: &Option<String>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(ref p) = path {
        return Ok(Some(input::file::read_document(p)?));
    }
    match input::stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
