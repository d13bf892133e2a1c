//! Built-in Action Library entries.
//!
//! Applied at startup; an entry is identified by its `{scope, text_tr}`
//! pair, so re-running the seed never duplicates rows.

use sqlx::PgPool;
use tracing::info;

use servio_core::types::Id;

/// `(scope, category, text_tr, text_en)`. Each language's text doubles as
/// its title, matching how technicians browse the library.
pub const SEED_ACTIONS: &[(&str, &str, &str, &str)] = &[
    (
        "valve",
        "overhaul",
        "Vana komple demonte edilerek tüm iç trim bileşenleri ayrıştırıldı.",
        "The valve was completely disassembled and all internal trim components were separated.",
    ),
    (
        "valve",
        "overhaul",
        "Gövde iç yüzeyleri korozyon/erozyon açısından incelendi.",
        "The internal body surfaces were inspected for corrosion and erosion.",
    ),
    (
        "valve",
        "overhaul",
        "Seat–plug sızdırmazlık yüzeylerinde laplama işlemi uygulandı.",
        "Lapping was performed on the seat-to-plug sealing surfaces.",
    ),
    ("valve", "overhaul", "Salmastra seti yenilendi.", "The packing set was replaced."),
    ("valve", "overhaul", "Gövde contası yenilendi.", "The body gasket was replaced."),
    (
        "valve",
        "overhaul",
        "O-ring ve sızdırmazlık elemanları değiştirildi.",
        "All O-rings and sealing elements were replaced.",
    ),
    ("valve", "overhaul", "Kumlama işlemi uygulandı.", "Abrasive blasting was carried out."),
    (
        "valve",
        "overhaul",
        "Yüzey hazırlığı sonrası astar ve son kat boya uygulandı.",
        "Following surface preparation, primer and finish coats were applied.",
    ),
    ("valve", "overhaul", "Vana yeniden monte edildi.", "The valve was reassembled."),
    (
        "valve",
        "overhaul",
        "Sızdırmazlık testi gerçekleştirildi.",
        "A leak-tightness test was performed.",
    ),
    (
        "valve",
        "overhaul",
        "Fonksiyonel strok testi yapıldı.",
        "A functional stroke test was completed.",
    ),
    (
        "valve",
        "overhaul",
        "Nihai görsel kontrol yapılarak sevke hazırlandı.",
        "Final visual inspection was completed and the unit was prepared for dispatch.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Aktüatör demonte edildi.",
        "The actuator was disassembled.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Diyafram kontrol edildi/değiştirildi.",
        "The diaphragm was inspected and replaced when required.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Keçeler ve O-ringler yenilendi.",
        "Seals and O-rings were renewed.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Bench set ayarı yapıldı.",
        "Bench set adjustment was performed.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Hava kaçak testi gerçekleştirildi.",
        "A pneumatic leak test was performed.",
    ),
    (
        "actuator_pneumatic",
        "service",
        "Fonksiyon testi yapıldı.",
        "A functional test was performed.",
    ),
    (
        "actuator_electric",
        "service",
        "İç temizlik yapıldı.",
        "Internal cleaning was carried out.",
    ),
    (
        "actuator_electric",
        "service",
        "Dişli kutusu kontrol edildi.",
        "The gearbox was inspected.",
    ),
    ("actuator_electric", "service", "Gres yenilendi.", "Grease was renewed."),
    (
        "actuator_electric",
        "service",
        "Limit switch ayarları kontrol edildi.",
        "Limit switch settings were checked.",
    ),
    (
        "actuator_electric",
        "service",
        "Elektriksel fonksiyon testi yapıldı.",
        "Electrical functional testing was performed.",
    ),
    (
        "positioner",
        "calibration",
        "Pozisyoner demonte edilerek temizlendi.",
        "The positioner was disassembled and cleaned.",
    ),
    (
        "positioner",
        "calibration",
        "Nozzle–flapper mekanizması kontrol edildi.",
        "The nozzle-flapper mechanism was checked.",
    ),
    (
        "positioner",
        "calibration",
        "Zero/span kalibrasyonu yapıldı.",
        "Zero/span calibration was performed.",
    ),
    (
        "positioner",
        "calibration",
        "Sinyal–pozisyon doğrulaması gerçekleştirildi.",
        "Signal-to-position verification was completed.",
    ),
    (
        "positioner",
        "calibration",
        "Stroking testi yapıldı.",
        "A stroking test was performed.",
    ),
    (
        "accessory",
        "checklist",
        "Solenoid kontrol edildi/değiştirildi.",
        "The solenoid was inspected and replaced when required.",
    ),
    ("accessory", "checklist", "Limit switch ayarlandı.", "The limit switch was adjusted."),
    ("accessory", "checklist", "AFR filtre değiştirildi.", "The AFR filter was replaced."),
    (
        "accessory",
        "checklist",
        "I/P converter kontrol edildi.",
        "The I/P converter was checked.",
    ),
];

/// Select the seed entries not yet present, keeping their 1-based positions
/// as order indexes.
pub fn missing_entries(
    existing: &[(String, String)],
) -> Vec<(usize, &'static (&'static str, &'static str, &'static str, &'static str))> {
    SEED_ACTIONS
        .iter()
        .enumerate()
        .filter(|(_, (scope, _, tr, _))| {
            !existing
                .iter()
                .any(|(s, t)| s == scope && t == tr)
        })
        .map(|(idx, entry)| (idx + 1, entry))
        .collect()
}

/// Insert any seed entries missing from the library. Returns the number of
/// rows created.
pub async fn ensure_action_library_seed(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let existing =
        crate::repositories::ActionLibraryRepo::existing_seed_keys(pool).await?;
    let missing = missing_entries(&existing);

    let mut created = 0u64;
    for (order_index, (scope, category, tr, en)) in &missing {
        sqlx::query(
            "INSERT INTO action_library (id, scope, category, order_index, title_tr, \
             title_en, text_tr, text_en, is_active, created_by_user) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, 'seed')",
        )
        .bind(Id::now_v7())
        .bind(scope)
        .bind(category)
        .bind(*order_index as i64)
        .bind(tr)
        .bind(en)
        .bind(tr)
        .bind(en)
        .execute(pool)
        .await?;
        created += 1;
    }

    if created > 0 {
        info!(created, "seeded action library entries");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_gets_every_entry() {
        let missing = missing_entries(&[]);
        assert_eq!(missing.len(), SEED_ACTIONS.len());
        assert_eq!(missing[0].0, 1);
        assert_eq!(missing.last().unwrap().0, SEED_ACTIONS.len());
    }

    #[test]
    fn seeded_library_gets_nothing() {
        let existing: Vec<(String, String)> = SEED_ACTIONS
            .iter()
            .map(|(scope, _, tr, _)| (scope.to_string(), tr.to_string()))
            .collect();
        assert!(missing_entries(&existing).is_empty());
    }

    #[test]
    fn partially_seeded_library_keeps_original_order_indexes() {
        let existing = vec![(
            SEED_ACTIONS[0].0.to_string(),
            SEED_ACTIONS[0].2.to_string(),
        )];
        let missing = missing_entries(&existing);
        assert_eq!(missing.len(), SEED_ACTIONS.len() - 1);
        assert_eq!(missing[0].0, 2);
    }

    #[test]
    fn user_entries_do_not_block_the_seed() {
        let existing = vec![("valve".to_string(), "Custom note added by hand.".to_string())];
        assert_eq!(missing_entries(&existing).len(), SEED_ACTIONS.len());
    }

    #[test]
    fn seed_keys_are_unique() {
        for (i, (scope_a, _, tr_a, _)) in SEED_ACTIONS.iter().enumerate() {
            for (scope_b, _, tr_b, _) in &SEED_ACTIONS[i + 1..] {
                assert!(
                    !(scope_a == scope_b && tr_a == tr_b),
                    "duplicate seed key {scope_a}/{tr_a}"
                );
            }
        }
    }
}
