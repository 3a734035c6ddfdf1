/// Identifier quoting
///
/// Qualified names are split on `.` and every segment is wrapped in
/// backticks. A segment that already contains a backtick is rejected.

use crate::types::QueryError;

const QUOTE: char = '`';

/// `ts.agent_id` -> `` `ts`.`agent_id` ``. A bare `*` segment stays unquoted.
pub fn quote_identifier(name: &str) -> Result<String, QueryError> {
    if name.contains(QUOTE) {
        return Err(QueryError::UnsupportedIdentifier(name.to_string()));
    }
    let quoted: Vec<String> = name
        .split('.')
        .map(|segment| {
            if segment == "*" {
                segment.to_string()
            } else {
                format!("{QUOTE}{segment}{QUOTE}")
            }
        })
        .collect();
    Ok(quoted.join("."))
}

/// Quotes every name and joins them with `, `.
pub fn quote_list(names: &[String]) -> Result<String, QueryError> {
    let quoted = names
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join(", "))
}
