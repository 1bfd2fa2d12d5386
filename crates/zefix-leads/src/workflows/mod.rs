pub mod companies;
pub mod extraction;
pub mod registry;
pub mod workbook;
