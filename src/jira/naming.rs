//! Pure builders for release names, deep links and follow-up identifiers.

use crate::error::RequestError;

/// Release name for a project: `<projectKey>-R<releaseIdentifier>`
pub fn release_name(project_key: &str, identifier: &str) -> String {
    format!("{}-R{}", project_key, identifier)
}

/// Human-facing link to a fix-version
pub fn version_url(web_url: &str, project_key: &str, version_id: &str) -> String {
    format!(
        "{}/projects/{}/versions/{}",
        web_url.trim_end_matches('/'),
        project_key,
        version_id
    )
}

/// Check that the final dot-segment is a non-negative base-10 integer
/// that can still be incremented after a naming conflict
pub fn validate_identifier(identifier: &str) -> Result<(), RequestError> {
    increment_identifier(identifier).map(|_| ())
}

/// Suggest the next identifier after a naming conflict.
///
/// The final segment is incremented and zero-padded to its original width:
/// `24.07.27.07` becomes `24.07.27.08`, `1.9` becomes `1.10`.
pub fn increment_identifier(identifier: &str) -> Result<String, RequestError> {
    let (head, last) = split_identifier(identifier)?;

    let next = last
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_add(1))
        .ok_or_else(|| RequestError::IdentifierOverflow {
            identifier: identifier.to_string(),
        })?;
    let padded = format!("{:0width$}", next, width = last.len());

    Ok(match head {
        Some(head) => format!("{}.{}", head, padded),
        None => padded,
    })
}

fn split_identifier(identifier: &str) -> Result<(Option<&str>, &str), RequestError> {
    let (head, last) = match identifier.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, identifier),
    };

    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RequestError::NonNumericSegment {
            identifier: identifier.to_string(),
            segment: last.to_string(),
        });
    }

    Ok((head, last))
}
