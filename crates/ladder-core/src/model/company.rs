use serde::Serialize;

/// A company row: the owner of a set of collaborators.
///
/// Outward JSON shape is `{id, name}`; timestamps stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    #[serde(rename = "id")]
    pub company_id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub created_at_us: i64,
}

#[cfg(test)]
mod tests {
    use super::Company;

    #[test]
    fn serializes_to_outward_shape() {
        let company = Company {
            company_id: "c-1".to_string(),
            name: "Initech".to_string(),
            created_at_us: 1000,
        };

        let json = serde_json::to_value(&company).expect("serialize");
        assert_eq!(json["id"], "c-1");
        assert_eq!(json["name"], "Initech");
        assert!(json.get("created_at_us").is_none());
    }
}
