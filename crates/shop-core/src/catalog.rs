//! Product catalog: lookup, substring search, and the loading boundary.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::Product;

/// The fixed set of purchasable products known to the system.
///
/// Immutable once constructed; all lookups preserve catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Exact match on the human-facing SKU.
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Case-insensitive substring search over description, category, and
    /// code, OR-combined. The summary blurb is not scanned. Results keep
    /// catalog order; no ranking.
    ///
    /// This is the local fallback used when intent resolution fails.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.code.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Catalog-pane filter: substring match on description or category,
    /// optionally narrowed to an exact category.
    pub fn filtered(&self, query: &str, category: Option<&str>) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                (p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle))
                    && category.map_or(true, |c| p.category == c)
            })
            .collect()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// External collaborator providing the initial product list.
///
/// Eventually resolves to a list of products or fails with a
/// [`CatalogError`]; the caller owns the retry affordance.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

/// A catalog source backed by an in-memory product list, with optional
/// artificial latency to mimic a remote fetch.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
    latency: Option<Duration>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            latency: None,
        }
    }

    /// The built-in demo catalog.
    pub fn demo() -> Self {
        Self::new(demo_catalog())
    }

    /// Add artificial latency before each fetch resolves.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.products.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(self.products.clone())
    }
}

fn product(
    id: &str,
    code: &str,
    description: &str,
    price: u64,
    category: &str,
    image_seed: u32,
    summary: &str,
) -> Product {
    Product {
        id: id.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image_url: Some(format!("https://picsum.photos/400/400?random={}", image_seed)),
        summary: Some(summary.to_string()),
    }
}

/// The demo grocery catalog.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        product(
            "p1",
            "RIZ-001",
            "Sac Riz Mega (25kg)",
            3500,
            "Céréales & Grains",
            1,
            "Riz blanc américain de qualité supérieure. Grain long, parfait pour le riz collé.",
        ),
        product(
            "p2",
            "HUI-001",
            "Huile Gourmet (1 Gallon)",
            1200,
            "Huiles & Condiments",
            2,
            "Huile végétale pure, idéale pour la friture et la cuisine de tous les jours.",
        ),
        product(
            "p3",
            "PAS-001",
            "Spaghetti Bongu (Paquet)",
            85,
            "Pâtes",
            3,
            "Pâtes alimentaires enrichies. Cuisson rapide 8 minutes.",
        ),
        product(
            "p4",
            "LAI-001",
            "Lait Évaporé Carnation (Boîte)",
            150,
            "Produits Laitiers",
            4,
            "Lait évaporé riche et crémeux, indispensable pour les smoothies et le café.",
        ),
        product(
            "p5",
            "POI-001",
            "Pois Noirs Secs (Marmite)",
            400,
            "Céréales & Grains",
            5,
            "Pois noirs locaux, parfaits pour la sauce pois traditionnelle.",
        ),
        product(
            "p6",
            "SUC-001",
            "Sucre Brun (Sac 5 lbs)",
            600,
            "Épicerie Sucrée",
            6,
            "Sucre de canne naturel, idéal pour les jus et la pâtisserie.",
        ),
        product(
            "p7",
            "EPI-001",
            "Cube Bouillon Maggi (Tablette)",
            25,
            "Épices",
            7,
            "Assaisonnement complet pour relever le goût de vos plats.",
        ),
        product(
            "p8",
            "SAU-001",
            "Pâte de Tomate (Petite boîte)",
            60,
            "Conserves",
            8,
            "Concentré de tomate pour colorer et parfumer vos sauces et riz.",
        ),
        product(
            "p9",
            "BOI-001",
            "Cola Couronne (Bouteille verre)",
            75,
            "Boissons",
            9,
            "Le soda fruité classique d'Haïti. À servir très frais.",
        ),
        product(
            "p10",
            "DIV-001",
            "Corn Flakes (Boîte)",
            450,
            "Petit-Déjeuner",
            10,
            "Céréales de maïs croustillantes pour un petit-déjeuner énergétique.",
        ),
    ]
}
