/// The demo CRUD resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dummy {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub optional_field: Option<String>,
}

/// Fields for a dummy that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewDummy {
    pub name: String,
    pub description: String,
    pub optional_field: Option<String>,
}

/// Partial update; `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct DummyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub optional_field: Option<String>,
}
