//! Integration tests for device creation, hardware-ID derivation, range
//! enforcement, and cascade deletion.

use assert_matches::assert_matches;
use sqlx::PgPool;

use devicetrace_core::error::CoreError;
use devicetrace_core::kind::ComputerKind;
use devicetrace_db::error::DbError;
use devicetrace_db::models::component::{
    CreateHardDrive, CreateMotherboard, CreateNetworkAdapter, CreateRamModule,
};
use devicetrace_db::models::computer::CreateComputer;
use devicetrace_db::models::device::UpdateDevice;
use devicetrace_db::repositories::{ComponentRepo, ComputerRepo, DeviceRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_computer(kind: ComputerKind) -> CreateComputer {
    CreateComputer {
        kind,
        pid: None,
        gid: None,
        model: None,
        manufacturer: None,
        serial_number: None,
        weight_kg: None,
        width_m: None,
        height_m: None,
    }
}

fn identified_computer(serial: &str) -> CreateComputer {
    CreateComputer {
        model: Some("Veriton X2110".to_string()),
        manufacturer: Some("Acer".to_string()),
        serial_number: Some(serial.to_string()),
        ..new_computer(ComputerKind::Desktop)
    }
}

fn new_ram(parent_id: Option<i64>) -> CreateRamModule {
    CreateRamModule {
        parent_id,
        pid: None,
        gid: None,
        model: None,
        manufacturer: None,
        serial_number: None,
        weight_kg: None,
        width_m: None,
        height_m: None,
        size_mb: Some(4096),
        speed_mhz: Some(1333.0),
    }
}

fn new_hard_drive(parent_id: Option<i64>) -> CreateHardDrive {
    CreateHardDrive {
        parent_id,
        pid: None,
        gid: None,
        model: None,
        manufacturer: None,
        serial_number: None,
        weight_kg: None,
        width_m: None,
        height_m: None,
        size_mb: Some(500_000),
        erasure: None,
        tests: None,
        benchmarks: None,
    }
}

// ---------------------------------------------------------------------------
// Hardware-ID derivation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_triple_derives_hid(pool: PgPool) {
    let computer = ComputerRepo::create(&pool, &identified_computer("AA34"))
        .await
        .unwrap();
    assert_eq!(computer.kind, "Desktop");
    assert_eq!(computer.hid.as_deref(), Some("acer-aa34-veriton_x2110"));

    let found = DeviceRepo::find_by_hid(&pool, "acer-aa34-veriton_x2110")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, computer.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incomplete_triple_skips_hid(pool: PgPool) {
    let input = CreateComputer {
        serial_number: None,
        ..identified_computer("ignored")
    };
    let computer = ComputerRepo::create(&pool, &input).await.unwrap();
    assert_eq!(computer.hid, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_hid_conflicts(pool: PgPool) {
    ComputerRepo::create(&pool, &identified_computer("AA34"))
        .await
        .unwrap();
    let err = ComputerRepo::create(&pool, &identified_computer("AA34"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Range enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_boundary_values_accepted(pool: PgPool) {
    let input = CreateComputer {
        weight_kg: Some(0.1),
        width_m: Some(3.0),
        height_m: Some(0.1),
        ..new_computer(ComputerKind::Laptop)
    };
    let computer = ComputerRepo::create(&pool, &input).await.unwrap();
    assert_eq!(computer.weight_kg, Some(0.1));
    assert_eq!(computer.width_m, Some(3.0));

    let ram = ComponentRepo::create_ram_module(
        &pool,
        &CreateRamModule {
            size_mb: Some(128),
            speed_mhz: Some(10_000.0),
            ..new_ram(None)
        },
    )
    .await
    .unwrap();
    assert_eq!(ram.size_mb, Some(128));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_weight_rejected(pool: PgPool) {
    let input = CreateComputer {
        weight_kg: Some(3.5),
        ..new_computer(ComputerKind::Desktop)
    };
    let err = ComputerRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        &err,
        DbError::Core(CoreError::Validation(msg)) if msg.contains("weight_kg")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_component_attribute_rejected(pool: PgPool) {
    let err = ComponentRepo::create_ram_module(
        &pool,
        &CreateRamModule {
            size_mb: Some(64),
            ..new_ram(None)
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        &err,
        DbError::Core(CoreError::Validation(msg)) if msg.contains("size_mb")
    );
}

/// Writes that bypass DTO validation still hit the CHECK constraint, and
/// the classified error names the field.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraint_names_field(pool: PgPool) {
    let err = sqlx::query("INSERT INTO devices (kind, weight_kg) VALUES ('Desktop', 9.0)")
        .execute(&pool)
        .await
        .unwrap_err();
    let err = DbError::from(err);
    assert_matches!(
        &err,
        DbError::Core(CoreError::Validation(msg)) if msg.contains("weight_kg")
    );
}

// ---------------------------------------------------------------------------
// Ownership and cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_computer_removes_its_components(pool: PgPool) {
    let computer = ComputerRepo::create(&pool, &new_computer(ComputerKind::Server))
        .await
        .unwrap();
    let other = ComputerRepo::create(&pool, &new_computer(ComputerKind::Desktop))
        .await
        .unwrap();

    let ram = ComponentRepo::create_ram_module(&pool, &new_ram(Some(computer.id)))
        .await
        .unwrap();
    let disk = ComponentRepo::create_hard_drive(&pool, &new_hard_drive(Some(computer.id)))
        .await
        .unwrap();
    let survivor = ComponentRepo::create_ram_module(&pool, &new_ram(Some(other.id)))
        .await
        .unwrap();

    let deleted = ComputerRepo::delete(&pool, computer.id).await.unwrap();
    assert!(deleted);

    // The owned components are gone entirely, base rows included.
    for id in [computer.id, ram.component.device.id, disk.component.device.id] {
        assert!(DeviceRepo::find_by_id(&pool, id).await.unwrap().is_none());
    }

    // A component of another computer is untouched.
    assert!(ComponentRepo::find(&pool, survivor.component.device.id)
        .await
        .unwrap()
        .is_some());
}

/// Deleting a computer through the generic device path must cascade the same
/// way as [`ComputerRepo::delete`]: the owned components' base rows must not
/// survive as orphans.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generic_delete_removes_owned_components(pool: PgPool) {
    let computer = ComputerRepo::create(&pool, &new_computer(ComputerKind::Laptop))
        .await
        .unwrap();
    let ram = ComponentRepo::create_ram_module(&pool, &new_ram(Some(computer.id)))
        .await
        .unwrap();

    let deleted = DeviceRepo::delete(&pool, computer.id).await.unwrap();
    assert!(deleted);

    for id in [computer.id, ram.component.device.id] {
        assert!(DeviceRepo::find_by_id(&pool, id).await.unwrap().is_none());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_returns_false(pool: PgPool) {
    assert!(!ComputerRepo::delete(&pool, 999_999).await.unwrap());
    assert!(!DeviceRepo::delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_component_parent_must_be_computer(pool: PgPool) {
    let ram = ComponentRepo::create_ram_module(&pool, &new_ram(None))
        .await
        .unwrap();
    // Another component is a device but not a computer.
    let err = ComponentRepo::create_hard_drive(
        &pool,
        &new_hard_drive(Some(ram.component.device.id)),
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Attachment and assembly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attach_and_list_components(pool: PgPool) {
    let computer = ComputerRepo::create(&pool, &new_computer(ComputerKind::Netbook))
        .await
        .unwrap();
    let ram = ComponentRepo::create_ram_module(&pool, &new_ram(None))
        .await
        .unwrap();
    assert_eq!(ram.component.parent_id, None);

    let attached = ComponentRepo::set_parent(&pool, ram.component.device.id, Some(computer.id))
        .await
        .unwrap();
    assert!(attached);

    let with_components = ComputerRepo::find_with_components(&pool, computer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_components.components, vec![ram.component.device.id]);
    assert_eq!(
        with_components.url,
        format!("/devices/{}", computer.id)
    );

    let listed = ComponentRepo::list_by_parent(&pool, computer.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].parent_id, Some(computer.id));

    // Detach: the component survives, the computer loses it.
    let detached = ComponentRepo::set_parent(&pool, ram.component.device.id, None)
        .await
        .unwrap();
    assert!(detached);
    let found = ComponentRepo::find(&pool, ram.component.device.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.component().parent_id, None);
    assert!(ComponentRepo::list_by_parent(&pool, computer.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_motherboard(pool: PgPool) {
    let board = ComponentRepo::create_motherboard(
        &pool,
        &CreateMotherboard {
            parent_id: None,
            pid: None,
            gid: None,
            model: Some("H61M-K".to_string()),
            manufacturer: None,
            serial_number: None,
            weight_kg: None,
            width_m: None,
            height_m: None,
            slots: Some(2),
            usb: Some(6),
            firewire: Some(0),
            serial: Some(1),
            pcmcia: Some(0),
        },
    )
    .await
    .unwrap();
    assert_eq!(board.slots, Some(2));
    assert_eq!(board.component.device.kind, "Motherboard");

    let found = ComponentRepo::find(&pool, board.component.device.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.kind().as_str(), "Motherboard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_network_adapter(pool: PgPool) {
    let adapter = ComponentRepo::create_network_adapter(
        &pool,
        &CreateNetworkAdapter {
            parent_id: None,
            pid: None,
            gid: None,
            model: None,
            manufacturer: None,
            serial_number: None,
            weight_kg: None,
            width_m: None,
            height_m: None,
            speed_mbps: Some(1000),
        },
    )
    .await
    .unwrap();
    assert_eq!(adapter.speed_mbps, Some(1000));

    let found = ComponentRepo::find(&pool, adapter.component.device.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.kind().as_str(), "NetworkAdapter");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_device(pool: PgPool) {
    let computer = ComputerRepo::create(&pool, &new_computer(ComputerKind::Microtower))
        .await
        .unwrap();

    let updated = DeviceRepo::update(
        &pool,
        computer.id,
        &UpdateDevice {
            pid: Some("rack-7".to_string()),
            gid: None,
            weight_kg: Some(1.5),
            width_m: None,
            height_m: None,
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");
    assert_eq!(updated.pid.as_deref(), Some("rack-7"));
    assert_eq!(updated.weight_kg, Some(1.5));

    let err = DeviceRepo::update(
        &pool,
        computer.id,
        &UpdateDevice {
            pid: None,
            gid: None,
            weight_kg: Some(0.01),
            width_m: None,
            height_m: None,
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_component_dispatches_kind(pool: PgPool) {
    let disk = ComponentRepo::create_hard_drive(&pool, &new_hard_drive(None))
        .await
        .unwrap();
    let found = ComponentRepo::find(&pool, disk.component.device.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.kind().as_str(), "HardDrive");
    assert_eq!(found.id(), disk.component.device.id);

    // A computer id is not a component.
    let computer = ComputerRepo::create(&pool, &new_computer(ComputerKind::Desktop))
        .await
        .unwrap();
    assert!(ComponentRepo::find(&pool, computer.id).await.unwrap().is_none());
}
