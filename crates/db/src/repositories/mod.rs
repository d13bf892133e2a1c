mod action_library_repo;
mod catalog_repo;
mod company_profile_repo;
mod customer_repo;
mod export_repo;
mod photo_repo;
mod product_repo;
mod report_repo;
mod template_repo;
mod user_repo;

pub use action_library_repo::ActionLibraryRepo;
pub use catalog_repo::{BrandRepo, ProductModelRepo};
pub use company_profile_repo::CompanyProfileRepo;
pub use customer_repo::{ContactRepo, CustomerRepo};
pub use export_repo::ExportRepo;
pub use photo_repo::PhotoRepo;
pub use product_repo::ProductRepo;
pub use report_repo::ReportRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
