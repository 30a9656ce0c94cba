//! Catalog loading and validation.
//!
//! A catalog is built once from a [`CatalogDocument`] (the serialized form of
//! the dataset) and validated eagerly: identifiers and slugs must be unique,
//! every product must reference a known category slug, prices must be
//! non-negative and representable, products need at least one image and
//! ratings stay in 1..=5.
//! What happens to offending records is decided by the [`LoadPolicy`].

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{Category, Product, Testimonial};
use crate::error::{CatalogError, Entity, Violation};
use crate::ids::{CategoryId, ProductId, TestimonialId};
use crate::money::{Currency, Money};
use crate::seed;
use crate::store::Catalog;

/// What to do with records that break a catalog invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Fail on the first violation.
    #[default]
    Strict,
    /// Drop offending records, log them and keep loading.
    SkipInvalid,
}

impl LoadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPolicy::Strict => "strict",
            LoadPolicy::SkipInvalid => "skip-invalid",
        }
    }
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(LoadPolicy::Strict),
            "skip-invalid" | "skip_invalid" | "lenient" => Ok(LoadPolicy::SkipInvalid),
            other => Err(format!("unknown load policy '{}'", other)),
        }
    }
}

/// Serialized category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: String,
}

/// Serialized product record. Prices are plain decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inStock", alias = "in_stock", default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
}

fn default_true() -> bool {
    true
}

/// Serialized testimonial record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestimonialRecord {
    pub id: u32,
    pub name: String,
    pub text: String,
    pub rating: i64,
}

/// The serialized catalog dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub testimonials: Vec<TestimonialRecord>,
}

impl CatalogDocument {
    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Violations recorded while loading under [`LoadPolicy::SkipInvalid`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub violations: Vec<Violation>,
}

impl LoadReport {
    /// Check if every record was accepted.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of records dropped.
    pub fn skipped(&self) -> usize {
        self.violations.len()
    }
}

/// Builds validated [`Catalog`]s.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    policy: LoadPolicy,
    currency: Currency,
}

impl CatalogLoader {
    /// Create a strict loader pricing in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the load policy.
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the currency decimal prices are read in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Load the dataset bundled with the crate.
    pub fn load_builtin(&self) -> Result<Catalog, CatalogError> {
        debug!("loading built-in catalog");
        self.load_str(seed::BUILTIN_JSON)
    }

    /// Load a catalog from a JSON file.
    pub fn load_path(&self, path: &Path) -> Result<Catalog, CatalogError> {
        debug!(path = %path.display(), "loading catalog file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
        let document = CatalogDocument::from_json(&content).map_err(|e| match e {
            CatalogError::Parse(msg) => CatalogError::Parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        self.load_document(document)
    }

    /// Load a catalog from a JSON string.
    pub fn load_str(&self, json: &str) -> Result<Catalog, CatalogError> {
        self.load_document(CatalogDocument::from_json(json)?)
    }

    /// Convert and validate a parsed document.
    ///
    /// Records are checked one at a time in source order, so the first
    /// violation reported is the first offending record in the document.
    pub fn load_document(&self, document: CatalogDocument) -> Result<Catalog, CatalogError> {
        let categories = document
            .categories
            .into_iter()
            .map(|r| Category::new(r.id, r.name, r.slug, r.image))
            .collect();

        let products = document
            .products
            .into_iter()
            .map(|record| self.convert_product(record))
            .collect();

        let testimonials = document
            .testimonials
            .into_iter()
            .map(convert_testimonial)
            .collect();

        self.assemble(categories, products, testimonials)
    }

    /// Validate already-typed entities into a catalog.
    pub fn build(
        &self,
        categories: Vec<Category>,
        products: Vec<Product>,
        testimonials: Vec<Testimonial>,
    ) -> Result<Catalog, CatalogError> {
        self.assemble(
            categories,
            products.into_iter().map(Ok).collect(),
            testimonials.into_iter().map(Ok).collect(),
        )
    }

    fn convert_product(&self, record: ProductRecord) -> Result<Product, Violation> {
        let price = Money::try_from_decimal(record.price, self.currency).ok_or_else(|| {
            Violation::PriceOutOfRange {
                product: record.id.clone(),
                price: record.price,
            }
        })?;
        Ok(Product {
            id: ProductId::new(record.id),
            name: record.name,
            slug: record.slug,
            category: record.category,
            price,
            images: record.images,
            description: record.description,
            in_stock: record.in_stock,
            featured: record.featured,
        })
    }

    /// Check every record and keep the valid ones.
    ///
    /// `products` and `testimonials` carry conversion failures in place so
    /// they are reported at their position in the source.
    fn assemble(
        &self,
        categories: Vec<Category>,
        products: Vec<Result<Product, Violation>>,
        testimonials: Vec<Result<Testimonial, Violation>>,
    ) -> Result<Catalog, CatalogError> {
        let mut violations = Vec::new();

        let mut category_ids: HashSet<CategoryId> = HashSet::new();
        let mut category_slugs: HashSet<String> = HashSet::new();
        let mut kept_categories = Vec::with_capacity(categories.len());
        for category in categories {
            if category_ids.contains(&category.id) {
                self.reject(
                    &mut violations,
                    Violation::DuplicateId {
                        entity: Entity::Category,
                        id: category.id.into_inner(),
                    },
                )?;
                continue;
            }
            if category_slugs.contains(&category.slug) {
                self.reject(
                    &mut violations,
                    Violation::DuplicateSlug {
                        entity: Entity::Category,
                        slug: category.slug,
                    },
                )?;
                continue;
            }
            category_ids.insert(category.id.clone());
            category_slugs.insert(category.slug.clone());
            kept_categories.push(category);
        }

        let mut product_ids: HashSet<ProductId> = HashSet::new();
        let mut product_slugs: HashSet<String> = HashSet::new();
        let mut kept_products = Vec::with_capacity(products.len());
        for product in products {
            let checked = product.and_then(|product| {
                match check_product(&product, &product_ids, &product_slugs, &category_slugs) {
                    Some(violation) => Err(violation),
                    None => Ok(product),
                }
            });
            let product = match checked {
                Ok(product) => product,
                Err(violation) => {
                    self.reject(&mut violations, violation)?;
                    continue;
                }
            };
            product_ids.insert(product.id.clone());
            product_slugs.insert(product.slug.clone());
            kept_products.push(product);
        }

        let mut testimonial_ids: HashSet<TestimonialId> = HashSet::new();
        let mut kept_testimonials = Vec::with_capacity(testimonials.len());
        for testimonial in testimonials {
            let testimonial = match testimonial {
                Ok(testimonial) => testimonial,
                Err(violation) => {
                    self.reject(&mut violations, violation)?;
                    continue;
                }
            };
            if !Testimonial::is_valid_rating(testimonial.rating as i64) {
                self.reject(
                    &mut violations,
                    Violation::RatingOutOfRange {
                        testimonial: testimonial.id.get(),
                        rating: testimonial.rating as i64,
                    },
                )?;
                continue;
            }
            if !testimonial_ids.insert(testimonial.id) {
                self.reject(
                    &mut violations,
                    Violation::DuplicateId {
                        entity: Entity::Testimonial,
                        id: testimonial.id.to_string(),
                    },
                )?;
                continue;
            }
            kept_testimonials.push(testimonial);
        }

        let report = LoadReport { violations };
        info!(
            categories = kept_categories.len(),
            products = kept_products.len(),
            testimonials = kept_testimonials.len(),
            skipped = report.skipped(),
            policy = %self.policy,
            "catalog loaded"
        );

        Ok(Catalog::from_parts(
            kept_categories,
            kept_products,
            kept_testimonials,
            report,
        ))
    }

    fn reject(
        &self,
        violations: &mut Vec<Violation>,
        violation: Violation,
    ) -> Result<(), CatalogError> {
        match self.policy {
            LoadPolicy::Strict => Err(CatalogError::IntegrityViolation(violation)),
            LoadPolicy::SkipInvalid => {
                warn!(entity = %violation.entity(), "skipping record: {}", violation);
                violations.push(violation);
                Ok(())
            }
        }
    }
}

/// Ratings that do not even fit a `u8` cannot become a [`Testimonial`].
fn convert_testimonial(record: TestimonialRecord) -> Result<Testimonial, Violation> {
    let rating = u8::try_from(record.rating).map_err(|_| Violation::RatingOutOfRange {
        testimonial: record.id,
        rating: record.rating,
    })?;
    Ok(Testimonial::new(record.id, record.name, record.text, rating))
}

fn check_product(
    product: &Product,
    ids: &HashSet<ProductId>,
    slugs: &HashSet<String>,
    category_slugs: &HashSet<String>,
) -> Option<Violation> {
    if ids.contains(&product.id) {
        return Some(Violation::DuplicateId {
            entity: Entity::Product,
            id: product.id.to_string(),
        });
    }
    if slugs.contains(&product.slug) {
        return Some(Violation::DuplicateSlug {
            entity: Entity::Product,
            slug: product.slug.clone(),
        });
    }
    if !category_slugs.contains(&product.category) {
        return Some(Violation::DanglingCategory {
            product: product.id.to_string(),
            category: product.category.clone(),
        });
    }
    if product.price.is_negative() {
        return Some(Violation::NegativePrice {
            product: product.id.to_string(),
            price: product.price.to_decimal(),
        });
    }
    if product.images.is_empty() {
        return Some(Violation::MissingImages {
            product: product.id.to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "categories": [
            { "id": "1", "name": "Brincos", "slug": "brincos", "image": "https://img/c1.jpg" },
            { "id": "6", "name": "Sabonetes Artesanais", "slug": "sabonetes", "image": "https://img/c6.jpg" }
        ],
        "products": [
            {
                "id": "1", "name": "Brincos de Pérola Dourados", "slug": "brincos-perola-dourados",
                "category": "brincos", "price": 45.90, "images": ["https://img/p1.jpg"],
                "description": "Brincos elegantes.", "inStock": true, "featured": true
            },
            {
                "id": "27", "name": "Sabonete Lavanda Natural", "slug": "sabonete-lavanda-natural",
                "category": "sabonetes", "price": 22, "images": ["https://img/p27.jpg"],
                "description": "Relaxante.", "inStock": false, "featured": false
            }
        ],
        "testimonials": [
            { "id": 1, "name": "Maria Silva", "text": "Produtos maravilhosos!", "rating": 5 }
        ]
    }"#;

    fn document() -> CatalogDocument {
        CatalogDocument::from_json(SMALL).unwrap()
    }

    fn lenient() -> CatalogLoader {
        CatalogLoader::new().with_policy(LoadPolicy::SkipInvalid)
    }

    #[test]
    fn test_load_valid_document() {
        let catalog = CatalogLoader::new().load_str(SMALL).unwrap();
        assert_eq!(catalog.list_categories().len(), 2);
        assert_eq!(catalog.list_testimonials().len(), 1);
        assert!(catalog.load_report().is_clean());

        let soap = catalog.get_product_by_slug("sabonete-lavanda-natural").unwrap();
        assert_eq!(soap.price, Money::new(2200, Currency::AOA));
        assert!(!soap.in_stock);
    }

    #[test]
    fn test_currency_applies_to_prices() {
        let catalog = CatalogLoader::new()
            .with_currency(Currency::EUR)
            .load_str(SMALL)
            .unwrap();
        let earrings = catalog.get_product_by_slug("brincos-perola-dourados").unwrap();
        assert_eq!(earrings.price, Money::new(4590, Currency::EUR));
    }

    #[test]
    fn test_dangling_category_is_rejected() {
        let mut doc = document();
        doc.products[1].category = "velas".to_string();

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        match err {
            CatalogError::IntegrityViolation(Violation::DanglingCategory { product, category }) => {
                assert_eq!(product, "27");
                assert_eq!(category, "velas");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_product_slug_is_rejected() {
        let mut doc = document();
        doc.products[1].slug = "brincos-perola-dourados".to_string();

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::DuplicateSlug {
                entity: Entity::Product,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_category_id_is_rejected() {
        let mut doc = document();
        doc.categories[1].id = "1".to_string();

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::DuplicateId {
                entity: Entity::Category,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut doc = document();
        doc.products[0].price = -1.0;

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_unrepresentable_price_is_rejected() {
        let mut doc = document();
        doc.products[1].price = 1e18;

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        match err {
            CatalogError::IntegrityViolation(Violation::PriceOutOfRange { product, .. }) => {
                assert_eq!(product, "27");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_violation_follows_source_order() {
        let mut doc = document();
        doc.products[0].category = "velas".to_string();
        doc.products[1].price = -5.0;

        let err = CatalogLoader::new().load_document(doc.clone()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::DanglingCategory { ref product, .. })
                if product == "1"
        ));

        doc.products[1].price = 1e18;
        let catalog = lenient().load_document(doc).unwrap();
        let violations = &catalog.load_report().violations;
        assert_eq!(violations.len(), 2);
        assert!(matches!(violations[0], Violation::DanglingCategory { .. }));
        assert!(matches!(violations[1], Violation::PriceOutOfRange { .. }));
    }

    #[test]
    fn test_missing_images_is_rejected() {
        let mut doc = document();
        doc.products[0].images.clear();

        let err = CatalogLoader::new().load_document(doc).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::MissingImages { .. })
        ));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        for rating in [0, 6, -1, 300] {
            let mut doc = document();
            doc.testimonials[0].rating = rating;

            let err = CatalogLoader::new().load_document(doc).unwrap_err();
            assert!(matches!(
                err,
                CatalogError::IntegrityViolation(Violation::RatingOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_skip_invalid_drops_offending_records() {
        let mut doc = document();
        doc.products[1].category = "velas".to_string();
        doc.testimonials.push(TestimonialRecord {
            id: 1,
            name: "João Santos".to_string(),
            text: "Adorei!".to_string(),
            rating: 5,
        });

        let catalog = lenient().load_document(doc).unwrap();
        assert_eq!(catalog.list_products(&Default::default()).unwrap().len(), 1);
        assert_eq!(catalog.list_testimonials().len(), 1);
        assert_eq!(catalog.list_testimonials()[0].author, "Maria Silva");

        let report = catalog.load_report();
        assert_eq!(report.skipped(), 2);
        assert!(matches!(
            report.violations[0],
            Violation::DanglingCategory { .. }
        ));
        assert!(matches!(
            report.violations[1],
            Violation::DuplicateId {
                entity: Entity::Testimonial,
                ..
            }
        ));
    }

    #[test]
    fn test_skip_invalid_keeps_first_duplicate() {
        let mut doc = document();
        doc.categories[1].slug = "brincos".to_string();
        doc.products[1].category = "brincos".to_string();

        let catalog = lenient().load_document(doc).unwrap();
        let categories = catalog.list_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Brincos");
        assert_eq!(catalog.list_products(&Default::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_build_validates_typed_entities() {
        let categories = vec![Category::new("1", "Brincos", "brincos", "https://img/c1.jpg")];
        let products = vec![Product::new(
            "1",
            "Brincos Tassel Azul",
            "brincos-tassel-azul",
            "brincos",
            Money::new(3590, Currency::AOA),
        )];

        let err = CatalogLoader::new()
            .build(categories.clone(), products.clone(), Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::IntegrityViolation(Violation::MissingImages { .. })
        ));

        let products = products
            .into_iter()
            .map(|p| p.with_image("https://img/p4.jpg"))
            .collect();
        let catalog = CatalogLoader::new()
            .build(categories, products, Vec::new())
            .unwrap();
        assert!(catalog.get_product("1").is_ok());
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let json = r#"{
            "categories": [{ "id": "9", "name": "Velas Aromáticas", "slug": "velas", "image": "https://img/c9.jpg" }],
            "products": [{
                "id": "40", "name": "Vela de Soja", "slug": "vela-soja", "category": "velas",
                "price": 30, "images": ["https://img/p40.jpg"]
            }]
        }"#;
        let catalog = CatalogLoader::new().load_str(json).unwrap();
        let candle = catalog.get_product("40").unwrap();
        assert!(candle.in_stock);
        assert!(!candle.featured);
        assert!(candle.description.is_empty());
        assert!(catalog.list_testimonials().is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = CatalogLoader::new().load_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CatalogLoader::new()
            .load_path(Path::new("/nonexistent/catalog.json"))
            .unwrap_err();
        match err {
            CatalogError::Io(msg) => assert!(msg.contains("/nonexistent/catalog.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<LoadPolicy>().unwrap(), LoadPolicy::Strict);
        assert_eq!(
            "skip-invalid".parse::<LoadPolicy>().unwrap(),
            LoadPolicy::SkipInvalid
        );
        assert!("sometimes".parse::<LoadPolicy>().is_err());
    }
}
