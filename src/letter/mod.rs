//! Cover letter generation

pub mod achievements;
pub mod company;
pub mod composer;
pub mod templates;

pub use achievements::{select_proof_examples, Achievement, RequirementMatch};
pub use company::{extract_company_info, CompanyInfo};
pub use composer::{generate_cover_letter, generate_cover_letter_variants, CoverLetterSections, CoverLetterVariantSet, LetterRequest};
pub use templates::LetterStyle;
