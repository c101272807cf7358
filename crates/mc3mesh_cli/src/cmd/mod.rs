/// Geometry decode command.
pub mod dump;
/// Relocation and directory command.
pub mod info;
/// Catalog listing command.
pub mod list;
/// Group and mesh entry command.
pub mod meshes;

mod util;

#[cfg(test)]
mod test_support;
