use rand::SeedableRng;
use rand::rngs::StdRng;

use nutri_plan_rs::corpus::{Corpus, resolve};
use nutri_plan_rs::models::{CalorieBudget, CandidateItem, CandidatePlan, FoodRecord, Slot};
use nutri_plan_rs::planner::constants::{MAX_PORTION_GRAMS, MIN_PORTION_GRAMS};
use nutri_plan_rs::planner::{plan_offline, reconcile};

fn fixture_corpus() -> Corpus {
    vec![
        FoodRecord::new("Nasi Putih", 175.0, 3.0, 40.0, 0.3),
        FoodRecord::new("Nasi Merah", 110.0, 2.6, 23.0, 0.9),
        FoodRecord::new("Kentang Rebus", 87.0, 1.9, 20.0, 0.1),
        FoodRecord::new("Roti Gandum", 250.0, 13.0, 41.0, 3.4),
        FoodRecord::new("Ayam Goreng", 260.0, 27.0, 0.0, 16.0),
        FoodRecord::new("Ikan Bakar", 126.0, 22.0, 0.0, 4.0),
        FoodRecord::new("Telur Rebus", 155.0, 13.0, 1.1, 11.0),
        FoodRecord::new("Tahu Bacem", 147.0, 10.0, 9.0, 8.0),
        FoodRecord::new("Tempe Goreng", 336.0, 20.0, 7.8, 28.0),
        FoodRecord::new("Tumis Kangkung", 98.0, 3.0, 5.0, 7.0),
        FoodRecord::new("Sayur Asem", 60.0, 1.5, 8.0, 2.5),
        FoodRecord::new("Gado-gado", 137.0, 6.0, 10.0, 8.0),
        FoodRecord::new("Pisang Ambon", 92.0, 1.2, 24.0, 0.2),
        FoodRecord::new("Alpukat", 160.0, 2.0, 8.5, 14.7),
        FoodRecord::new("Bayam Mentah", 60.0, 2.9, 3.6, 0.4),
        FoodRecord::new("Daging Anak Sapi", 190.0, 20.0, 0.0, 12.0),
        FoodRecord::new("Minyak Kelapa", 870.0, 0.0, 0.0, 98.0),
        FoodRecord::new("Air Putih", 0.0, 0.0, 0.0, 0.0),
    ]
    .into()
}

fn item(name: &str, portion: f64, calories: f64, protein: f64, carbs: f64, fat: f64) -> CandidateItem {
    CandidateItem {
        name: Some(name.to_string()),
        portion_gram: Some(portion),
        calories: Some(calories),
        protein: Some(protein),
        carbs: Some(carbs),
        fat: Some(fat),
    }
}

#[test]
fn test_offline_total_never_exceeds_target() {
    let corpus = fixture_corpus();
    for seed in 0..200 {
        for target in [0.0, 300.0, 1200.0, 1850.0, 2000.0, 2450.0, 3300.0] {
            let plan = plan_offline(&corpus, &mut StdRng::seed_from_u64(seed), target);
            let total = plan.total_calories() as f64;
            assert!(
                total <= target,
                "seed {} target {}: total {} exceeds target",
                seed,
                target,
                total
            );
        }
    }
}

#[test]
fn test_offline_slot_counts_are_bounded() {
    let corpus = fixture_corpus();
    for seed in 0..100 {
        let plan = plan_offline(&corpus, &mut StdRng::seed_from_u64(seed), 3000.0);
        for slot in [Slot::Breakfast, Slot::Lunch, Slot::Dinner] {
            assert!(plan.slot(slot).len() <= 3);
        }
        assert!(plan.slot(Slot::Snack).len() <= 1);
    }
}

#[test]
fn test_offline_portions_are_clamped() {
    let corpus = fixture_corpus();
    for seed in 0..100 {
        let plan = plan_offline(&corpus, &mut StdRng::seed_from_u64(seed), 2500.0);
        for (slot, item) in plan.items() {
            let grams = item.portion_grams().expect("portion label is numeric");
            assert!(
                (MIN_PORTION_GRAMS as f64..=MAX_PORTION_GRAMS as f64).contains(&grams),
                "{} {} has portion {}",
                slot,
                item.name,
                item.portion
            );
        }
    }
}

#[test]
fn test_offline_excludes_outliers_and_denylist() {
    let corpus = fixture_corpus();
    for seed in 0..50 {
        let plan = plan_offline(&corpus, &mut StdRng::seed_from_u64(seed), 2000.0);
        for (_, item) in plan.items() {
            assert_ne!(item.name, "Bayam Mentah");
            assert_ne!(item.name, "Daging Anak Sapi");
            assert_ne!(item.name, "Minyak Kelapa");
            assert_ne!(item.name, "Air Putih");
        }
    }
}

#[test]
fn test_offline_end_to_end_2000_standard() {
    let budget = CalorieBudget::new(2000.0);
    assert_eq!(budget.breakfast, 500);
    assert_eq!(budget.lunch, 700);
    assert_eq!(budget.dinner, 600);
    assert_eq!(budget.snack, 200);

    let corpus = fixture_corpus();
    let plan = plan_offline(&corpus, &mut StdRng::seed_from_u64(42), 2000.0);
    for slot in Slot::ALL {
        assert!(!plan.slot(slot).is_empty(), "{} is empty", slot);
    }
    assert!(plan.total_calories() <= 2000);
}

#[test]
fn test_offline_empty_corpus_gives_empty_slots() {
    let plan = plan_offline(&Corpus::default(), &mut StdRng::seed_from_u64(7), 2000.0);
    assert!(plan.is_empty());

    let value = serde_json::to_value(&plan).unwrap();
    for slot in Slot::ALL {
        assert!(value[slot.key()].as_array().unwrap().is_empty());
    }
}

#[test]
fn test_reconcile_keeps_present_values() {
    let mut candidate = CandidatePlan::default();
    candidate.breakfast = vec![item("Nasi Putih", 150.0, 262.6, 4.4, 60.2, 0.5)];
    candidate.dinner = vec![item("Ikan Bakar", 120.0, 151.2, 26.4, 0.1, 4.8)];

    let plan = reconcile(&candidate, &fixture_corpus(), 414.0);

    let breakfast = &plan.slot(Slot::Breakfast)[0];
    assert_eq!(
        (breakfast.calories, breakfast.protein, breakfast.carbs, breakfast.fat),
        (263, 4, 60, 1)
    );
    assert_eq!(breakfast.portion, "150g");

    let dinner = &plan.slot(Slot::Dinner)[0];
    assert_eq!((dinner.calories, dinner.protein, dinner.carbs, dinner.fat), (151, 26, 0, 5));
}

#[test]
fn test_reconcile_backfills_missing_macros() {
    let mut candidate = CandidatePlan::default();
    candidate.lunch = vec![item("Nasi Putih", 200.0, 0.0, 0.0, 0.0, 0.0)];

    let plan = reconcile(&candidate, &fixture_corpus(), 350.0);
    let lunch = &plan.slot(Slot::Lunch)[0];

    assert_eq!(lunch.calories, 350);
    assert_eq!(lunch.protein, 6);
    assert_eq!(lunch.carbs, 80);
    assert_eq!(lunch.fat, 1);
    assert_eq!(lunch.portion, "200g");
}

/// An item with protein supplied but carbs missing is still backfilled, and
/// the supplied protein is replaced by the corpus value.
#[test]
fn test_reconcile_backfill_overwrites_supplied_protein_when_carbs_missing() {
    let mut candidate = CandidatePlan::default();
    candidate.snack = vec![item("Tahu Bacem", 100.0, 150.0, 25.0, 0.0, 0.0)];

    let plan = reconcile(&candidate, &fixture_corpus(), 150.0);
    let snack = &plan.slot(Slot::Snack)[0];

    assert_eq!(snack.calories, 150);
    assert_eq!(snack.protein, 10);
    assert_eq!(snack.carbs, 9);
    assert_eq!(snack.fat, 8);
}

#[test]
fn test_reconcile_uses_default_portion() {
    let mut candidate = CandidatePlan::default();
    candidate.lunch = vec![CandidateItem {
        name: Some("Tempe Goreng".to_string()),
        ..CandidateItem::default()
    }];

    let plan = reconcile(&candidate, &fixture_corpus(), 504.0);
    let lunch = &plan.slot(Slot::Lunch)[0];
    assert_eq!(lunch.portion, "150g");
    assert_eq!(lunch.calories, 504);
    assert_eq!(lunch.protein, 30);
}

#[test]
fn test_reconcile_tolerates_malformed_slots() {
    let value = serde_json::json!({
        "breakfast": "not a list",
        "lunch": [{"name": "Nasi Merah", "portionGram": "150g"}, 42, null],
        "snacks": [{"name": "Pisang Ambon", "portion_gram": 100, "calories": 92, "protein": 1.2, "carbs": 24, "fat": 0.2}]
    });
    let candidate = CandidatePlan::from_value(value).unwrap();
    let plan = reconcile(&candidate, &fixture_corpus(), 500.0);

    assert!(plan.slot(Slot::Breakfast).is_empty());
    assert!(plan.slot(Slot::Dinner).is_empty());
    assert_eq!(plan.slot(Slot::Lunch).len(), 1);
    assert_eq!(plan.slot(Slot::Lunch)[0].calories, 165);
    assert_eq!(plan.slot(Slot::Snack)[0].carbs, 24);
}

#[test]
fn test_resolver_prefers_exact_match() {
    let corpus: Corpus = vec![
        FoodRecord::new("Ayam Bakar Ayam Goreng Spesial", 300.0, 25.0, 5.0, 18.0),
        FoodRecord::new("Ayam Goreng", 260.0, 27.0, 0.0, 16.0),
    ]
    .into();

    let found = resolve("ayam goreng", &corpus).unwrap();
    assert_eq!(found.name, "Ayam Goreng");
}

#[test]
fn test_resolver_miss_is_none() {
    assert!(resolve("es teh manis", &fixture_corpus()).is_none());
}
