//! GraphQL documents for custom field definitions

use serde_json::{json, Map, Value};

pub const LIST_DEFINITIONS: &str = r"query GetCustomFieldDefinitions {
  appFoundationsCustomFieldDefinitions {
    edges {
      node {
        id
        legacyIDV2
        label
        associations {
          associatedEntity
          active
          validationOptions {
            required
          }
          allowedOperations
          associationCondition
        }
        dataType
        description
        dropDownOptions {
          id
          value
          active
          order
        }
        active
        customFieldDefinitionMetaModel {
          suggested
        }
      }
    }
  }
}";

pub const CREATE_DEFINITION: &str = r"mutation CreateCustomFieldDefinition(
  $input: AppFoundations_CustomFieldDefinitionCreateInput!
) {
  appFoundationsCreateCustomFieldDefinition(input: $input) {
    id
    label
    dataType
    active
    associations {
      associatedEntity
      active
      validationOptions {
        required
      }
      allowedOperations
      associationCondition
    }
    dropDownOptions {
      id
      value
      active
      order
    }
    legacyIDV2
  }
}";

pub const UPDATE_DEFINITION: &str = r"mutation UpdateCustomFieldDefinition(
  $input: AppFoundations_CustomFieldDefinitionUpdateInput!
) {
  appFoundationsUpdateCustomFieldDefinition(input: $input) {
    id
    legacyIDV2
    label
    dataType
    active
    associations {
      associatedEntity
      active
      validationOptions {
        required
      }
      allowedOperations
      associationCondition
    }
    dropDownOptions {
      id
      value
      active
      order
    }
  }
}";

const UPDATABLE_FIELDS: [&str; 7] =
    ["label", "dataType", "active", "associations", "dropDownOptions", "description", "legacyIDV2"];

/// Create input: defaults overlaid by non-null body values.
pub fn create_variables(body: &Map<String, Value>) -> Value {
    let mut input = json!({
        "label": "",
        "dataType": "STRING",
        "active": true,
        "associations": [],
        "dropDownOptions": [],
        "description": null,
    });

    for key in ["label", "dataType", "active", "associations", "dropDownOptions", "description"] {
        if let Some(value) = body.get(key).filter(|value| !value.is_null()) {
            input[key] = value.clone();
        }
    }

    json!({ "input": input })
}

/// Sparse update input: `id` plus each updatable key that is present and
/// non-null.
pub fn update_variables(id: &str, body: &Map<String, Value>) -> Value {
    let mut input = Map::new();
    input.insert("id".to_string(), json!(id));

    for key in UPDATABLE_FIELDS {
        if let Some(value) = body.get(key).filter(|value| !value.is_null()) {
            input.insert(key.to_string(), value.clone());
        }
    }

    json!({ "input": input })
}
