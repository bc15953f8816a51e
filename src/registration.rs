//! The registration form: its fields, default values and validation schema

use crate::state::{FormField, FormStore, FormValues, HobbyEntry};
use crate::validation::{AsyncPredicate, Rule, Schema};
use std::sync::Arc;

pub const LASTNAME: &str = "lastname";
pub const FIRSTNAME: &str = "firstname";
pub const PASSWORD: &str = "password";
pub const PASSWORD_CONFIRM: &str = "passwordConfirm";
pub const ACCOUNT_TYPE: &str = "type";
pub const SIRET: &str = "siret";
pub const RGPD: &str = "rgpd";
pub const HOBBIES: &str = "hobbies";

/// Account type whose selection makes the SIRET mandatory
pub const PRO: &str = "pro";
pub const PART: &str = "part";

pub const ACCOUNT_TYPES: &[(&str, &str)] = &[(PART, "Particulier"), (PRO, "Professionnel")];

pub const HOBBY_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

pub const PASSWORD_MIN_LEN: usize = 6;

/// Values the form starts with and returns to after a successful submission
pub fn defaults() -> FormValues {
    FormValues::new()
        .with(LASTNAME, "")
        .with(FIRSTNAME, "")
        .with(PASSWORD, "")
        .with(PASSWORD_CONFIRM, "")
        .with(ACCOUNT_TYPE, PART)
        .with(SIRET, "")
        .with(RGPD, false)
        .with(HOBBIES, Vec::<HobbyEntry>::new())
}

/// Validation schema; `remote` gates the last name
pub fn schema(remote: Arc<dyn AsyncPredicate>) -> Schema {
    Schema::new()
        .field(
            LASTNAME,
            vec![
                Rule::required("Ce champ est requis"),
                Rule::min_length(2, "Le nom est trop court"),
                Rule::remote(remote, "Ce nom n'est pas accepté"),
            ],
        )
        .field(
            FIRSTNAME,
            vec![Rule::min_length(2, "Le prénom est trop court")],
        )
        .field(
            PASSWORD,
            vec![
                Rule::required("Ce champ est requis"),
                Rule::min_length(
                    PASSWORD_MIN_LEN,
                    "Le mot de passe doit contenir au moins 6 caractères",
                ),
            ],
        )
        // Equality first: any mismatch reports as a mismatch, even when empty
        .field(
            PASSWORD_CONFIRM,
            vec![
                Rule::equals(PASSWORD, "Les mots de passe ne correspondent pas"),
                Rule::required("Ce champ est requis"),
            ],
        )
        .field(
            ACCOUNT_TYPE,
            vec![Rule::one_of(&[PART, PRO], "Type de compte invalide")],
        )
        .field(
            SIRET,
            vec![Rule::required_when(
                ACCOUNT_TYPE,
                PRO,
                "Le SIRET est requis pour un compte professionnel",
            )],
        )
        .field(
            RGPD,
            vec![Rule::required(
                "Vous devez accepter la politique de confidentialité",
            )],
        )
        .list(
            HOBBIES,
            vec![
                (
                    "value",
                    vec![
                        Rule::required("Veuillez renseigner un hobby"),
                        Rule::min_length(2, "Le hobby est trop court"),
                    ],
                ),
                ("level", vec![Rule::one_of(HOBBY_LEVELS, "Niveau invalide")]),
            ],
        )
}

/// Scalar inputs in display order
pub fn fields() -> Vec<FormField> {
    vec![
        FormField::text(LASTNAME, "Nom"),
        FormField::text(FIRSTNAME, "Prénom"),
        FormField::secret(PASSWORD, "Mot de passe"),
        FormField::secret(PASSWORD_CONFIRM, "Confirmation du mot de passe"),
        FormField::choice(ACCOUNT_TYPE, "Type de compte", ACCOUNT_TYPES),
        FormField::text(SIRET, "SIRET"),
        FormField::checkbox(RGPD, "J'accepte la politique de confidentialité"),
    ]
}

/// Whether a scalar field is currently shown
pub fn is_visible(name: &str, values: &FormValues) -> bool {
    name != SIRET || values.text(ACCOUNT_TYPE) == PRO
}

/// A store with every registration field bound
pub fn new_store() -> FormStore {
    let defaults = defaults();
    let names: Vec<String> = defaults.iter().map(|(name, _)| name.clone()).collect();
    let mut store = FormStore::new(defaults);
    for name in names {
        // Every name comes from the defaults, so registration cannot fail
        if let Err(e) = store.register(&name) {
            tracing::error!("Failed to register {name}: {e}");
        }
    }
    store
}
