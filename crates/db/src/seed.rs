//! Sample catalog records inserted into an empty store at startup.
//!
//! The fallback product served when no store is reachable is the first seed
//! product, so degraded responses always mirror what a freshly seeded store
//! would return for that slug.

use organimo_core::Product;

use crate::store::{RepositoryError, SqlProductStore};

fn sea_moss_gel() -> Product {
    Product {
        title: "Organimo® Sea Moss Gel".to_string(),
        slug: "sea-moss-gel".to_string(),
        description: "Premium wildcrafted Sea Moss gel infused with Bladderwrack for a daily wellness boost.".to_string(),
        price: 29.99,
        sku: "ORG-SM-001".to_string(),
        category: "gel".to_string(),
        image: "https://images.unsplash.com/photo-1604909052743-89d4387d9453?q=80&w=1200&auto=format&fit=crop".to_string(),
        badges: vec![
            "Vegan".to_string(),
            "Non-GMO".to_string(),
            "Gluten-Free".to_string(),
            "No Preservatives".to_string(),
            "Harvested in Canada".to_string(),
        ],
        rating: 4.9,
        reviews: 312,
    }
}

fn sea_moss_capsules() -> Product {
    Product {
        title: "Organimo® Sea Moss Capsules".to_string(),
        slug: "sea-moss-capsules".to_string(),
        description: "Convenient daily capsules with Sea Moss + Bladderwrack for energy and immune support.".to_string(),
        price: 24.99,
        sku: "ORG-SM-002".to_string(),
        category: "capsules".to_string(),
        image: "https://images.unsplash.com/photo-1590686576338-71b9362b61fe?q=80&w=1200&auto=format&fit=crop".to_string(),
        badges: vec!["Vegan".to_string(), "Non-GMO".to_string(), "No Preservatives".to_string()],
        rating: 4.8,
        reviews: 198,
    }
}

fn sea_moss_powder() -> Product {
    Product {
        title: "Organimo® Sea Moss + Bladderwrack Powder".to_string(),
        slug: "sea-moss-powder".to_string(),
        description: "Fine powder blend perfect for smoothies and recipes.".to_string(),
        price: 27.0,
        sku: "ORG-SM-003".to_string(),
        category: "powder".to_string(),
        image: "https://images.unsplash.com/photo-1517433456452-f9633a875f6f?q=80&w=1200&auto=format&fit=crop".to_string(),
        badges: vec!["Vegan".to_string(), "Gluten-Free".to_string()],
        rating: 4.7,
        reviews: 154,
    }
}

/// The full sample catalog, in insertion order.
pub fn seed_products() -> Vec<Product> {
    vec![sea_moss_gel(), sea_moss_capsules(), sea_moss_powder()]
}

/// The single product served in fallback mode.
pub fn fallback_product() -> Product {
    sea_moss_gel()
}

/// Insert the sample catalog if the store is empty. The only idempotence
/// guard is the emptiness check: a store emptied out-of-band is reseeded on
/// the next startup. Returns the number of products inserted.
pub async fn seed_if_empty(store: &SqlProductStore) -> Result<usize, RepositoryError> {
    if store.count().await? > 0 {
        return Ok(0);
    }
    let products = seed_products();
    store.insert_many(&products).await?;
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::{fallback_product, seed_if_empty, seed_products};
    use crate::store::{ProductStore, SqlProductStore};
    use crate::{connect_with_settings, migrations};

    async fn empty_store() -> SqlProductStore {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool");
        migrations::run_pending(&pool).await.expect("migrations");
        SqlProductStore::new(pool)
    }

    #[test]
    fn seed_contains_the_three_sample_products() {
        let slugs: Vec<String> =
            seed_products().into_iter().map(|product| product.slug).collect();
        assert_eq!(slugs, vec!["sea-moss-gel", "sea-moss-capsules", "sea-moss-powder"]);
    }

    #[test]
    fn fallback_product_mirrors_the_first_seed_product() {
        let fallback = fallback_product();
        assert_eq!(Some(&fallback), seed_products().first());
        assert_eq!(fallback.price, 29.99);
        assert_eq!(fallback.rating, 4.9);
        assert_eq!(fallback.reviews, 312);
    }

    #[tokio::test]
    async fn seeds_an_empty_store_exactly_once() {
        let store = empty_store().await;

        let inserted = seed_if_empty(&store).await.expect("first seed");
        assert_eq!(inserted, 3);
        assert_eq!(store.count().await.expect("count"), 3);

        let inserted_again = seed_if_empty(&store).await.expect("second seed");
        assert_eq!(inserted_again, 0);
        assert_eq!(store.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn does_not_touch_a_populated_store() {
        let store = empty_store().await;
        store
            .insert_many(&[fallback_product()])
            .await
            .expect("insert existing product");

        let inserted = seed_if_empty(&store).await.expect("seed check");
        assert_eq!(inserted, 0);
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn seeded_products_round_trip_through_the_store() {
        let store = empty_store().await;
        seed_if_empty(&store).await.expect("seed");

        let gel = store
            .find_by_slug("sea-moss-gel")
            .await
            .expect("lookup")
            .expect("gel present");
        assert_eq!(gel, fallback_product());
        assert_eq!(gel.badges.len(), 5);
    }
}
