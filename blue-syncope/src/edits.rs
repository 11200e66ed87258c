use crate::model::UserResource;

/// One `schema=value` assignment from the `newAttributeValue` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEdit {
    pub schema: String,
    pub value: String,
}

impl AttributeEdit {
    /// Split `firstname=test;surname=test` into edits, left to right.
    ///
    /// Segments without `=` are dropped. Only the first `=` separates the
    /// schema from the value, so values may contain `=` themselves.
    pub fn parse_all(spec: &str) -> Vec<AttributeEdit> {
        spec.split(';')
            .filter_map(|segment| segment.split_once('='))
            .map(|(schema, value)| AttributeEdit {
                schema: schema.to_string(),
                value: value.to_string(),
            })
            .collect()
    }
}

/// Apply edits in order; later edits of the same schema win.
/// Edits naming a schema the user does not carry are ignored.
pub(crate) fn apply_edits(user: &mut UserResource, edits: &[AttributeEdit]) {
    for edit in edits {
        user.set_first_value(&edit.schema, &edit.value);
    }
}
