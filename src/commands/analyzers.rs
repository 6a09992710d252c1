use crate::analyzers::REGISTRY;

/// Registry listing, in execution order.
pub fn run() -> String {
    let width = REGISTRY.iter().map(|d| d.name.len()).max().unwrap_or(0);
    REGISTRY
        .iter()
        .map(|d| format!("{:<width$}  {}\n", d.name, d.description))
        .collect()
}
