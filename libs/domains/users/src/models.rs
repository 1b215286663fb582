use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// User entity - one row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Database generated identifier
    #[serde(rename = "userId")]
    pub id: i64,
    /// The user's first name
    pub first_name: String,
    /// The user's last name
    pub last_name: String,
    /// The user's email address (unique)
    pub email_address: String,
    /// The userId of the user that can approve this user's absences
    pub approver_id: Option<i64>,
}

impl User {
    pub fn from_details(id: i64, details: UserDetails) -> Self {
        Self {
            id,
            first_name: details.first_name,
            last_name: details.last_name,
            email_address: details.email_address,
            approver_id: details.approver_id,
        }
    }

    /// Replace every mutable field with the given details
    pub fn apply_details(&mut self, details: UserDetails) {
        self.first_name = details.first_name;
        self.last_name = details.last_name;
        self.email_address = details.email_address;
        self.approver_id = details.approver_id;
    }
}

/// DTO carrying the mutable fields of a user (create body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(min = 1, max = 255))]
    pub email_address: String,
    #[serde(default)]
    pub approver_id: Option<i64>,
}

/// DTO for replacing an existing user (update body)
///
/// `userId` is optional. When present it must match the user being updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(flatten)]
    #[validate(nested)]
    pub details: UserDetails,
}

impl From<UserDetails> for UpdateUser {
    fn from(details: UserDetails) -> Self {
        Self {
            user_id: None,
            details,
        }
    }
}

/// Query for `get-user-by-id`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// The id of the user
    pub employee_id: i64,
}

/// Query for `get-user-by-email`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// The email address of the user
    pub email_address: String,
}

/// Query for `get-user-by-name`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// The first name of the user
    pub first_name: String,
    /// The last name of the user
    pub last_name: String,
}

/// Query for `get-users-by-approver`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ApproverQuery {
    /// The userId of the approver
    pub approver_id: i64,
}

/// Query for `update-user` and `delete-user`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TargetUserQuery {
    /// The id of the user to act on
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> UserDetails {
        UserDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_address: "john.doe@email.com".to_string(),
            approver_id: Some(1234),
        }
    }

    #[test]
    fn test_user_serializes_with_wire_names() {
        let user = User::from_details(123, john());
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(
            value,
            json!({
                "userId": 123,
                "firstName": "John",
                "lastName": "Doe",
                "emailAddress": "john.doe@email.com",
                "approverId": 1234
            })
        );
    }

    #[test]
    fn test_details_approver_defaults_to_none() {
        let details: UserDetails = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Roe",
            "emailAddress": "jane.roe@email.com"
        }))
        .unwrap();

        assert_eq!(details.approver_id, None);
    }

    #[test]
    fn test_details_validation_rejects_bad_email() {
        let mut details = john();
        details.email_address = "not-an-email".to_string();
        assert!(details.validate().is_err());
    }

    #[test]
    fn test_details_validation_rejects_empty_name() {
        let mut details = john();
        details.first_name = String::new();
        assert!(details.validate().is_err());
        assert!(john().validate().is_ok());
    }

    #[test]
    fn test_update_user_flattens_details() {
        let update: UpdateUser = serde_json::from_value(json!({
            "userId": 7,
            "firstName": "John",
            "lastName": "Doe",
            "emailAddress": "john.doe@email.com",
            "approverId": null
        }))
        .unwrap();

        assert_eq!(update.user_id, Some(7));
        assert_eq!(update.details.first_name, "John");
        assert_eq!(update.details.approver_id, None);
    }

    #[test]
    fn test_update_user_validates_nested_details() {
        let mut update = UpdateUser::from(john());
        assert!(update.validate().is_ok());

        update.details.email_address = "broken".to_string();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_details_replaces_every_field() {
        let mut user = User::from_details(1, john());
        user.apply_details(UserDetails {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            email_address: "jane.roe@email.com".to_string(),
            approver_id: None,
        });

        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Roe");
        assert_eq!(user.email_address, "jane.roe@email.com");
        assert_eq!(user.approver_id, None);
    }
}
