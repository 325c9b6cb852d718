/// Open Packaging Conventions (OPC) implementation.
///
/// The container layer of a WordprocessingML document:
///
/// - Part names and relationship targets (`packuri`, `rel`)
/// - Parts and the in-memory package (`part`, `package`)
/// - `[Content_Types].xml` and ZIP serialization (`pkgwriter`, `phys_pkg`)
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use phys_pkg::Compression;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
