use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// # Claims
/// Fields of a verified provider callback, without the `openid.` prefix.
///
/// Only the fields named in `signed` are covered by the signature. Use
/// [Claims::signed_value] (or the profile accessors, which go through it)
/// for anything that must be authenticated. [Claims::get] returns unsigned
/// auxiliary fields as well.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    fields: HashMap<String, String>,
    signed: Vec<String>,
}

impl Claims {
    pub(crate) fn new(fields: HashMap<String, String>, signed: Vec<String>) -> Self {
        Self { fields, signed }
    }

    /// Gets any field, signed or not
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.as_str())
    }

    /// Gets a field only if it is listed in `signed`
    pub fn signed_value(&self, name: &str) -> Option<&str> {
        if !self.is_signed(name) {
            return None;
        }
        self.get(name)
    }

    /// Whether `name` was covered by the signature
    pub fn is_signed(&self, name: &str) -> bool {
        self.signed.iter().any(|s| s == name)
    }

    /// Field names in signing order
    pub fn signed(&self) -> &[String] {
        &self.signed
    }

    /// All decoded fields
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    /// Consumes the claims, returning the decoded field mapping
    pub fn into_fields(self) -> HashMap<String, String> {
        self.fields
    }

    /// Signed `op_endpoint`
    pub fn op_endpoint(&self) -> Option<&str> {
        self.signed_value("op_endpoint")
    }

    /// Signed `claimed_id`
    pub fn claimed_id(&self) -> Option<&str> {
        self.signed_value("claimed_id")
    }

    /// Signed `identity`
    pub fn identity(&self) -> Option<&str> {
        self.signed_value("identity")
    }

    /// Signed `sreg.nickname`
    pub fn nickname(&self) -> Option<&str> {
        self.signed_value("sreg.nickname")
    }

    /// Signed `sreg.email`
    pub fn email(&self) -> Option<&str> {
        self.signed_value("sreg.email")
    }

    /// Signed `sreg.fullname`
    pub fn fullname(&self) -> Option<&str> {
        self.signed_value("sreg.fullname")
    }
}
