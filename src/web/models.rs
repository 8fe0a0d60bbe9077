use serde::Deserialize;

/// Every field the `/api` endpoint understands, from either the query string
/// or an urlencoded or multipart body.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ApiParams {
    pub action: Option<String>,
    pub service: Option<String>,
    /// Lifecycle action for `control`.
    pub command: Option<String>,
    pub package: Option<String>,
    pub lines: Option<String>,
}

impl ApiParams {
    /// `action` is taken from the query string first, then the body.
    pub fn action(query: &ApiParams, body: &ApiParams) -> Option<String> {
        query
            .action
            .clone()
            .or_else(|| body.action.clone())
            .filter(|a| !a.is_empty())
    }

    /// Stores a named body field; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "action" => &mut self.action,
            "service" => &mut self.service,
            "command" => &mut self.command,
            "package" => &mut self.package,
            "lines" => &mut self.lines,
            _ => return,
        };
        *slot = Some(value);
    }
}
