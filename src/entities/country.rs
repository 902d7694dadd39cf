// 🌍 Country Entity - one authoritative name per ISO2 code

/// Length of an ISO 3166-1 alpha-2 code
pub const ISO2_CODE_LEN: usize = 2;

/// Country owning zero or more banks.
///
/// Created on the first bank that references an unseen ISO2 code, or during
/// bulk import. Never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub iso2: String,
    pub name: String,
}

impl Country {
    pub fn new(iso2: String, name: String) -> Self {
        Country { iso2, name }
    }

    /// Exact comparison against the stored, authoritative name
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}
