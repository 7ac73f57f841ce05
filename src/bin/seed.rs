use axum_shop_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        Categories, Customers, Orders, ShopItems, categories, customers,
        orders::{self, LineItems, StoredLineItem},
        shop_items::{self, CategoryIds},
    },
    models::OrderStatus,
    rules::{PricedLine, ShopItemRef, compute_total_price},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    clear_all(&orm).await?;
    println!("Previous data cleared");

    let customers = seed_customers(&orm).await?;
    let categories = seed_categories(&orm).await?;
    let items = seed_shop_items(&orm, &categories).await?;
    let orders = seed_orders(&orm, &customers, &items).await?;

    println!(
        "Seed completed: {} customers, {} categories, {} shop items, {} orders",
        customers.len(),
        categories.len(),
        items.len(),
        orders
    );
    Ok(())
}

async fn clear_all(orm: &OrmConn) -> anyhow::Result<()> {
    Orders::delete_many().exec(orm).await?;
    ShopItems::delete_many().exec(orm).await?;
    Categories::delete_many().exec(orm).await?;
    Customers::delete_many().exec(orm).await?;
    Ok(())
}

async fn seed_customers(orm: &OrmConn) -> anyhow::Result<Vec<Uuid>> {
    let customers = [
        ("John", "Doe", "john.doe@example.com"),
        ("Jane", "Smith", "jane.smith@example.com"),
        ("Michael", "Johnson", "michael.johnson@example.com"),
    ];

    let mut ids = Vec::with_capacity(customers.len());
    for (name, surname, email) in customers {
        let now = Utc::now();
        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.into()),
            surname: Set(surname.into()),
            email: Set(email.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
        ids.push(customer.id);
    }

    println!("{} customers inserted", ids.len());
    Ok(ids)
}

async fn seed_categories(orm: &OrmConn) -> anyhow::Result<Vec<Uuid>> {
    let categories = [
        ("Electronics", "Electronic devices and accessories"),
        ("Clothing", "Apparel and fashion items"),
        ("Books", "Literature, textbooks, and other reading materials"),
        ("Home & Kitchen", "Household items and kitchen appliances"),
    ];

    let mut ids = Vec::with_capacity(categories.len());
    for (title, description) in categories {
        let now = Utc::now();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.into()),
            description: Set(description.into()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
        ids.push(category.id);
    }

    println!("{} categories inserted", ids.len());
    Ok(ids)
}

/// Returns `(id, price)` for each inserted item.
async fn seed_shop_items(orm: &OrmConn, categories: &[Uuid]) -> anyhow::Result<Vec<(Uuid, f64)>> {
    let items: [(&str, &str, f64, Vec<usize>); 7] = [
        ("Smartphone", "Latest model smartphone with high-end features", 699.99, vec![0]),
        ("Laptop", "Powerful laptop for work and entertainment", 1299.99, vec![0]),
        ("T-shirt", "Comfortable cotton t-shirt", 19.99, vec![1]),
        ("Jeans", "Classic blue jeans", 49.99, vec![1]),
        ("Novel", "Bestselling fiction novel", 12.99, vec![2]),
        ("Cookbook", "Collection of recipes from around the world", 24.99, vec![2, 3]),
        ("Blender", "High-power kitchen blender", 89.99, vec![3]),
    ];

    let mut seeded = Vec::with_capacity(items.len());
    for (title, description, price, category_idx) in items {
        let now = Utc::now();
        let item = shop_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.into()),
            description: Set(description.into()),
            price: Set(price),
            categories: Set(CategoryIds(
                category_idx
                    .into_iter()
                    .filter_map(|idx| categories.get(idx).copied())
                    .collect(),
            )),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
        seeded.push((item.id, item.price));
    }

    println!("{} shop items inserted", seeded.len());
    Ok(seeded)
}

async fn seed_orders(
    orm: &OrmConn,
    customers: &[Uuid],
    items: &[(Uuid, f64)],
) -> anyhow::Result<usize> {
    let orders: [(usize, [(usize, i64); 2]); 3] = [
        (0, [(0, 1), (4, 2)]),
        (1, [(2, 3), (3, 1)]),
        (2, [(1, 1), (6, 1)]),
    ];

    let mut inserted = 0;
    for (customer_idx, lines) in orders {
        let Some(&customer_id) = customers.get(customer_idx) else {
            continue;
        };
        let lines: Vec<(Uuid, f64, i64)> = lines
            .into_iter()
            .filter_map(|(item_idx, quantity)| {
                items.get(item_idx).map(|&(id, price)| (id, price, quantity))
            })
            .collect();

        let priced: Vec<PricedLine> = lines
            .iter()
            .map(|&(_, price, quantity)| PricedLine {
                shop_item: ShopItemRef::Resolved { price },
                quantity,
            })
            .collect();
        let total_price = compute_total_price(&priced, orm).await?;

        let now = Utc::now();
        orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            items: Set(LineItems(
                lines
                    .iter()
                    .map(|&(shop_item, _, quantity)| StoredLineItem { shop_item, quantity })
                    .collect(),
            )),
            total_price: Set(total_price),
            status: Set(OrderStatus::Pending.as_str().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
        inserted += 1;
    }

    println!("{inserted} orders inserted");
    Ok(inserted)
}
