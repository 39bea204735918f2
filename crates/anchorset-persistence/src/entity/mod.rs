//! SeaORM entity definitions for the calculator tables

pub mod anchor;
pub mod cartridge;
pub mod formula_constant;
pub mod group;
pub mod product;
pub mod product_eta;
pub mod product_image;
pub mod theme_setting;
pub mod usage_factor;

pub mod prelude {
    pub use super::anchor::Entity as Anchor;
    pub use super::cartridge::Entity as Cartridge;
    pub use super::formula_constant::Entity as FormulaConstant;
    pub use super::group::Entity as Group;
    pub use super::product::Entity as Product;
    pub use super::product_eta::Entity as ProductEta;
    pub use super::product_image::Entity as ProductImage;
    pub use super::theme_setting::Entity as ThemeSetting;
    pub use super::usage_factor::Entity as UsageFactor;
}
