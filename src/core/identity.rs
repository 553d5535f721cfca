//! Identity business logic - registration, login and role checks for residents.
//!
//! Usernames and emails are normalized to lowercase before every lookup and insert,
//! and passwords are hashed with Argon2id using a fresh random salt. A failed login
//! never reveals whether the username exists.

use crate::{
    entities::{Resident, Role, resident},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`register`]; field rules are checked by the caller (see `forms`).
#[derive(Debug, Clone)]
pub struct NewResident {
    /// Desired login name (any case)
    pub username: String,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: String,
    /// Contact email (any case)
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Registers a new resident.
///
/// The resident starts unaccepted, active, with the `USER` role.
///
/// # Errors
/// * `Error::Duplicate` if the username or email is already taken (case-insensitively)
pub async fn register(db: &DatabaseConnection, new_resident: NewResident) -> Result<resident::Model> {
    let username = normalize(&new_resident.username);
    let email = normalize(&new_resident.email);

    if find_by_column(db, resident::Column::Username, &username)
        .await?
        .is_some()
    {
        return Err(Error::Duplicate {
            entity: "resident",
            field: "username",
        });
    }

    if find_by_column(db, resident::Column::Email, &email)
        .await?
        .is_some()
    {
        return Err(Error::Duplicate {
            entity: "resident",
            field: "email",
        });
    }

    let password_hash = hash_password(&new_resident.password)?;

    let resident = resident::ActiveModel {
        username: Set(username),
        name: Set(capitalize(&new_resident.name)),
        surname: Set(capitalize(&new_resident.surname)),
        email: Set(email),
        image_file: Set(resident::DEFAULT_IMAGE_FILE.to_string()),
        password_hash: Set(password_hash),
        accepted: Set(false),
        active: Set(true),
        role: Set(Role::User),
        last_login: Set(None),
        ..Default::default()
    };

    // The check above races with concurrent registrations; the unique columns decide.
    let created = resident.insert(db).await.map_err(|err| {
        let field = if err.to_string().contains("email") {
            "email"
        } else {
            "username"
        };
        Error::from_insert(err, "resident", field)
    })?;

    info!(
        resident_id = created.id,
        username = %created.username,
        "Registered new resident, awaiting acceptance"
    );
    Ok(created)
}

/// Verifies credentials and records the login time.
///
/// # Errors
/// * `Error::Auth` for an unknown username or a wrong password alike
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<resident::Model> {
    let Some(resident) = get_resident_by_username(db, username).await? else {
        // Same Argon2 work as a real verification, so timing does not reveal the username.
        hash_password(password)?;
        return Err(Error::Auth);
    };

    if !verify_password(password, &resident.password_hash)? {
        return Err(Error::Auth);
    }

    let mut active_model: resident::ActiveModel = resident.into();
    active_model.last_login = Set(Some(Utc::now()));
    let updated = active_model.update(db).await?;

    info!(resident_id = updated.id, "Resident logged in");
    Ok(updated)
}

/// True iff someone is logged in and their role is `ADMIN`.
#[must_use]
pub fn is_admin(current: Option<&resident::Model>) -> bool {
    current.is_some_and(|resident| resident.role == Role::Admin)
}

/// Loads a resident by id.
pub async fn get_resident(db: &DatabaseConnection, resident_id: i64) -> Result<resident::Model> {
    Resident::find_by_id(resident_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("resident", resident_id))
}

/// Finds a resident by username, ignoring case.
pub async fn get_resident_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<resident::Model>> {
    find_by_column(db, resident::Column::Username, &normalize(username)).await
}

/// All residents ordered by surname, then name.
pub async fn list_residents(db: &DatabaseConnection) -> Result<Vec<resident::Model>> {
    Resident::find()
        .order_by_asc(resident::Column::Surname)
        .order_by_asc(resident::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Grants the administrator role. Used to seed the configured administrator.
pub async fn promote_to_admin(db: &DatabaseConnection, resident_id: i64) -> Result<resident::Model> {
    let resident = get_resident(db, resident_id).await?;
    if resident.role == Role::Admin {
        return Ok(resident);
    }

    let mut active_model: resident::ActiveModel = resident.into();
    active_model.role = Set(Role::Admin);
    let updated = active_model.update(db).await?;

    info!(resident_id = updated.id, "Granted administrator role");
    Ok(updated)
}

async fn find_by_column(
    db: &DatabaseConnection,
    column: resident::Column,
    value: &str,
) -> Result<Option<resident::Model>> {
    Resident::find()
        .filter(column.eq(value))
        .one(db)
        .await
        .map_err(Into::into)
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// First character uppercase, the rest lowercase.
fn capitalize(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("jAN"), "Jan");
        assert_eq!(capitalize("  łukasz "), "Łukasz");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_password_hash_round_trip() -> Result<()> {
        let hash = hash_password("hunter2")?;
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash)?);
        assert!(!verify_password("hunter3", &hash)?);
        Ok(())
    }

    #[test]
    fn test_same_password_gets_different_salts() -> Result<()> {
        assert_ne!(hash_password("secret")?, hash_password("secret")?);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_normalizes_fields() -> Result<()> {
        let db = setup_test_db().await?;

        let resident = register(
            &db,
            NewResident {
                username: "KasiaK".to_string(),
                name: "kASIA".to_string(),
                surname: "kowalska".to_string(),
                email: "Kasia@Example.COM".to_string(),
                password: "tajne".to_string(),
            },
        )
        .await?;

        assert_eq!(resident.username, "kasiak");
        assert_eq!(resident.name, "Kasia");
        assert_eq!(resident.surname, "Kowalska");
        assert_eq!(resident.email, "kasia@example.com");
        assert_ne!(resident.password_hash, "tajne");
        assert_eq!(resident.role, Role::User);
        assert_eq!(resident.image_file, resident::DEFAULT_IMAGE_FILE);
        assert!(!resident.accepted);
        assert!(resident.active);
        assert!(resident.last_login.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_username_any_case() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_resident(&db, "tomek").await?;

        let result = register(
            &db,
            NewResident {
                username: "TOMEK".to_string(),
                name: "Other".to_string(),
                surname: "Person".to_string(),
                email: "different@example.com".to_string(),
                password: "other".to_string(),
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Duplicate {
                field: "username",
                ..
            })
        ));
        assert_eq!(Resident::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_resident(&db, "ola").await?;

        let result = register(
            &db,
            NewResident {
                username: "someone_else".to_string(),
                name: "Some".to_string(),
                surname: "One".to_string(),
                email: "OLA@example.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Duplicate { field: "email", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unique_column_violation_maps_to_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        let existing = create_test_resident(&db, "piotr").await?;

        // Bypass the pre-check to exercise the schema-level guard.
        let clash = resident::ActiveModel {
            username: Set(existing.username.clone()),
            name: Set("X".to_string()),
            surname: Set("Y".to_string()),
            email: Set("unique@example.com".to_string()),
            image_file: Set(resident::DEFAULT_IMAGE_FILE.to_string()),
            password_hash: Set("x".to_string()),
            accepted: Set(false),
            active: Set(true),
            role: Set(Role::User),
            last_login: Set(None),
            ..Default::default()
        };
        let err = clash.insert(&db).await.unwrap_err();
        let mapped = Error::from_insert(err, "resident", "username");
        assert!(matches!(mapped, Error::Duplicate { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_success_updates_last_login() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_resident(&db, "marta").await?;

        let logged_in = authenticate(&db, "Marta", TEST_PASSWORD).await?;
        assert_eq!(logged_in.username, "marta");
        assert!(logged_in.last_login.is_some());

        let stored = get_resident(&db, logged_in.id).await?;
        assert_eq!(stored.last_login, logged_in.last_login);
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_resident(&db, "jan").await?;

        let wrong_password = authenticate(&db, "jan", "not-the-password")
            .await
            .unwrap_err();
        let unknown_user = authenticate(&db, "nobody", TEST_PASSWORD)
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, Error::Auth));
        assert!(matches!(unknown_user, Error::Auth));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_username_runs_hasher_and_fails_with_auth() -> Result<()> {
        let db = setup_test_db().await?;
        let long = "long-password".repeat(20);

        for password in ["", "x", long.as_str()] {
            assert!(matches!(
                authenticate(&db, "ghost", password).await,
                Err(Error::Auth)
            ));
        }
        assert!(get_resident_by_username(&db, "ghost").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_unaccepted_resident_can_still_log_in() -> Result<()> {
        let db = setup_test_db().await?;
        let resident = create_test_resident(&db, "newbie").await?;
        assert!(!resident.accepted);

        assert!(authenticate(&db, "newbie", TEST_PASSWORD).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_is_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_resident(&db, "user").await?;
        let admin = create_test_admin(&db, "boss").await?;

        assert!(!is_admin(None));
        assert!(!is_admin(Some(&user)));
        assert!(is_admin(Some(&admin)));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_resident_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_resident(&db, 404).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_residents_sorted_by_surname() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_resident(&db, "b", "Basia", "Zielinska").await?;
        create_custom_resident(&db, "a", "Adam", "Adamski").await?;

        let residents = list_residents(&db).await?;
        let surnames: Vec<_> = residents.iter().map(|r| r.surname.as_str()).collect();
        assert_eq!(surnames, vec!["Adamski", "Zielinska"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_promote_to_admin_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let resident = create_test_resident(&db, "future_admin").await?;

        let promoted = promote_to_admin(&db, resident.id).await?;
        assert_eq!(promoted.role, Role::Admin);
        let again = promote_to_admin(&db, resident.id).await?;
        assert_eq!(again, promoted);
        Ok(())
    }
}
