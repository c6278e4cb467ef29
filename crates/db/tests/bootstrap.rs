use sqlx::PgPool;

/// Full bootstrap: connect, migrate, verify the hierarchy tables exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    devicetrace_db::health_check(&pool).await.unwrap();

    let tables = [
        "devices",
        "computers",
        "components",
        "graphic_cards",
        "hard_drives",
        "motherboards",
        "network_adapters",
        "ram_modules",
    ];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The hardware-ID uniqueness and range constraints must be present under
/// their expected names, since error classification relies on them.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_named_constraints_exist(pool: PgPool) {
    let constraints = [
        "uq_devices_hid",
        "ck_devices_weight_kg",
        "ck_devices_width_m",
        "ck_devices_height_m",
        "ck_graphic_cards_memory_mb",
        "ck_hard_drives_size_mb",
        "ck_motherboards_slots",
        "ck_network_adapters_speed_mbps",
        "ck_ram_modules_size_mb",
        "ck_ram_modules_speed_mhz",
    ];
    for name in constraints {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = $1)",
        )
        .bind(name)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists.0, "constraint {name} is missing");
    }
}
