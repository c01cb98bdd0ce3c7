//! Product display code generation
//!
//! Codes look like `PAT03CAT07`: the product's 1-based position within its
//! category followed by the category number. The code is a cosmetic label
//! for storefront display; the record id remains the unique key. Two
//! concurrent creates in the same category can observe the same count and
//! mint the same label, which is tolerated for exactly that reason.

/// Build the display code for the next product in a category
pub fn generate(cat_no: u32, existing_in_category: i64) -> String {
    format!("PAT0{}CAT0{}", existing_in_category + 1, cat_no)
}
