use getset::Getters;
use serde::{Deserialize, Serialize};

/// Company record captured once at setup. The ledger math never depends on
/// it; the report title does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct CompanyProfile {
    name: String,
    address: String,
    telephone: String,
    fax: String,
    email: String,
}

impl CompanyProfile {
    pub fn new(name: &str, address: &str, telephone: &str, fax: &str, email: &str) -> CompanyProfile {
        CompanyProfile {
            name: name.to_string(),
            address: address.to_string(),
            telephone: telephone.to_string(),
            fax: fax.to_string(),
            email: email.to_string(),
        }
    }
}
