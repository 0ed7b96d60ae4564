#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog,
    LoadDetail { name: String, request: u64 },
}
