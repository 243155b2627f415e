/// Clustered empty-cell generation
pub mod clustering;
/// Generation pass orchestration and the public entry points
pub mod executor;
/// Row-major placement planning and render geometry
pub mod placement;
