//! User data models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A user record, as stored in the `user` table and exchanged over the API.
///
/// `email`, `nickName` and `password` must be present in a request body;
/// `dni` defaults to an empty string and `status` to `false` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Surrogate key. `None` until the store assigns one.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// National identity number.
    #[serde(default)]
    pub dni: String,
    /// Birth date, without a time component.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    pub email: String,
    pub nick_name: String,
    /// Stored and compared as plain text.
    pub password: String,
    /// `true` marks the account as active and listable.
    #[serde(default)]
    pub status: bool,
}

impl User {
    /// Builder-style helper to set the id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginStatus {
    ValidPassword,
    InvalidPassword,
}

impl LoginStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginStatus::ValidPassword => "validPassword",
            LoginStatus::InvalidPassword => "invalidPassword",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, LoginStatus::ValidPassword)
    }
}

impl std::fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for `POST /user/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    /// Email or nickname.
    pub identifier: String,
    pub password: String,
}

/// Response body for `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: LoginStatus,
}

/// Accepts `YYYY-MM-DD` as well as full timestamps, keeping only the date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}"))),
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_uses_camel_case_fields() {
        let user = User {
            id: Some(7),
            name: Some("Juan".to_string()),
            last_name: Some("Pérez".to_string()),
            dni: "12345678A".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 6),
            email: "juan@example.com".to_string(),
            nick_name: "juanp".to_string(),
            password: "password123".to_string(),
            status: true,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["lastName"], "Pérez");
        assert_eq!(value["nickName"], "juanp");
        assert_eq!(value["date"], "2024-09-06");
        assert_eq!(value["status"], true);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let user: User = serde_json::from_value(json!({
            "name": "Juan",
            "email": "juan@example.com",
            "nickName": "juanp",
            "password": "password123"
        }))
        .unwrap();

        assert_eq!(user.id, None);
        assert_eq!(user.last_name, None);
        assert_eq!(user.dni, "");
        assert_eq!(user.date, None);
        assert!(!user.status);
    }

    #[test]
    fn test_credentials_are_required() {
        for missing in ["email", "nickName", "password"] {
            let mut body = json!({
                "email": "juan@example.com",
                "nickName": "juanp",
                "password": "password123",
                "status": true
            });
            body.as_object_mut().unwrap().remove(missing);

            let err = serde_json::from_value::<User>(body).unwrap_err();
            assert!(err.to_string().contains(missing), "{err}");
        }
    }

    fn with_date(date: serde_json::Value) -> serde_json::Result<User> {
        serde_json::from_value(json!({
            "email": "juan@example.com",
            "nickName": "juanp",
            "password": "password123",
            "date": date
        }))
    }

    #[test]
    fn test_date_accepts_timestamp() {
        let user = with_date(json!("2024-09-06T15:50:14.462Z")).unwrap();
        assert_eq!(user.date, NaiveDate::from_ymd_opt(2024, 9, 6));

        let user = with_date(json!("2012-10-28")).unwrap();
        assert_eq!(user.date, NaiveDate::from_ymd_opt(2012, 10, 28));

        let user = with_date(json!(null)).unwrap();
        assert_eq!(user.date, None);
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert!(with_date(json!("28/10/2012")).is_err());
    }

    #[test]
    fn test_login_status_wire_format() {
        let body = LoginResponse {
            status: LoginStatus::ValidPassword,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": "validPassword" })
        );
        assert_eq!(
            serde_json::to_value(LoginStatus::InvalidPassword).unwrap(),
            json!("invalidPassword")
        );
        assert_eq!(LoginStatus::InvalidPassword.to_string(), "invalidPassword");
    }
}
