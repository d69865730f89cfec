use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Only PostgreSQL URLs are accepted; fail fast on anything else.
pub fn validate_database_url(url: &str) -> anyhow::Result<()> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(())
    } else {
        bail!("Invalid database URL: must start with postgres:// or postgresql://")
    }
}

struct SeedProperty {
    name: &'static str,
    address: &'static str,
    price: i64,
    code_internal: &'static str,
    year: i32,
    owner: usize,
    // (file, enabled); empty means the property is listed without an image
    images: &'static [(&'static str, bool)],
}

const SEED_OWNERS: &[(&str, &str, Option<&str>, (i32, u32, u32))] = &[
    (
        "John Smith",
        "456 Oak Avenue, Seattle, WA 98101",
        Some("https://randomuser.me/api/portraits/men/1.jpg"),
        (1975, 3, 15),
    ),
    (
        "Sarah Johnson",
        "789 Pine Street, Portland, OR 97201",
        Some("https://randomuser.me/api/portraits/women/2.jpg"),
        (1982, 7, 22),
    ),
    (
        "Michael Chen",
        "321 Maple Drive, San Francisco, CA 94102",
        Some("https://randomuser.me/api/portraits/men/3.jpg"),
        (1988, 11, 30),
    ),
];

const SEED_PROPERTIES: &[SeedProperty] = &[
    SeedProperty {
        name: "Modern Downtown Apartment",
        address: "123 Main Street, Seattle, WA 98101",
        price: 450_000,
        code_internal: "PROP-001",
        year: 2020,
        owner: 0,
        images: &[
            ("https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=800", true),
            ("https://images.unsplash.com/photo-1484154218962-a197022b5858?w=800", true),
        ],
    },
    SeedProperty {
        name: "Luxury Waterfront Condo",
        address: "555 Harbor View, Seattle, WA 98109",
        price: 850_000,
        code_internal: "PROP-002",
        year: 2021,
        owner: 0,
        images: &[(
            "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?w=800",
            true,
        )],
    },
    SeedProperty {
        name: "Cozy Suburban House",
        address: "789 Elm Street, Portland, OR 97213",
        price: 325_000,
        code_internal: "PROP-003",
        year: 2018,
        owner: 1,
        images: &[
            ("https://images.unsplash.com/photo-1568605114967-8130f3a36994?w=800", true),
            ("https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=800", false),
        ],
    },
    SeedProperty {
        name: "Spacious Family Home",
        address: "432 Cedar Lane, Portland, OR 97206",
        price: 520_000,
        code_internal: "PROP-004",
        year: 2019,
        owner: 1,
        images: &[],
    },
    SeedProperty {
        name: "Penthouse Suite",
        address: "100 Mission Street, San Francisco, CA 94105",
        price: 1_200_000,
        code_internal: "PROP-005",
        year: 2022,
        owner: 2,
        images: &[(
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800",
            true,
        )],
    },
    SeedProperty {
        name: "Charming Victorian",
        address: "678 Haight Street, San Francisco, CA 94117",
        price: 975_000,
        code_internal: "PROP-006",
        year: 1905,
        owner: 2,
        images: &[(
            "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=800",
            true,
        )],
    },
];

/// Replace the contents of the three listing tables with the sample data
/// set. Development convenience only; destructive by design.
pub async fn seed_sample_data(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM property_images")
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM properties").execute(pool).await?;
    sqlx::query("DELETE FROM owners").execute(pool).await?;

    let mut owner_ids = Vec::with_capacity(SEED_OWNERS.len());
    for (name, address, photo, (y, m, d)) in SEED_OWNERS {
        let id = Uuid::new_v4();
        let birthday = NaiveDate::from_ymd_opt(*y, *m, *d)
            .expect("seed birthday is a valid calendar date");

        sqlx::query(
            "INSERT INTO owners (id, name, address, photo, birthday) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(photo)
        .bind(birthday)
        .execute(pool)
        .await?;

        owner_ids.push(id);
    }

    let mut image_count = 0usize;
    for property in SEED_PROPERTIES {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO properties \
             (id, owner_id, name, address, price, code_internal, year) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(owner_ids[property.owner])
        .bind(property.name)
        .bind(property.address)
        .bind(Decimal::new(property.price, 0))
        .bind(property.code_internal)
        .bind(property.year)
        .execute(pool)
        .await?;

        for (file, enabled) in property.images {
            sqlx::query(
                "INSERT INTO property_images (id, property_id, file, enabled) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(file)
            .bind(enabled)
            .execute(pool)
            .await?;
            image_count += 1;
        }
    }

    info!(
        owners = SEED_OWNERS.len(),
        properties = SEED_PROPERTIES.len(),
        images = image_count,
        "sample data seeded"
    );

    Ok(())
}
