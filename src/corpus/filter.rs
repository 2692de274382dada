use std::fmt::Write as _;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::corpus::Corpus;
use crate::models::FoodRecord;
use crate::planner::constants::{REFERENCE_DENYLIST, is_denied};

/// Food groups used to build the prompt reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodCategory {
    Carbohydrate,
    AnimalProtein,
    PlantProtein,
    Vegetable,
    Fruit,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 5] = [
        FoodCategory::Carbohydrate,
        FoodCategory::AnimalProtein,
        FoodCategory::PlantProtein,
        FoodCategory::Vegetable,
        FoodCategory::Fruit,
    ];

    /// Lowercase name fragments that put a record in this group.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            FoodCategory::Carbohydrate => &[
                "nasi", "bubur", "lontong", "ketupat", "mie", "bihun", "kwetiau", "roti",
                "singkong", "ubi", "kentang", "jagung", "oatmeal", "havermut", "sagu", "talas",
            ],
            FoodCategory::AnimalProtein => &[
                "ayam", "telur", "ikan", "daging", "sapi", "udang", "cumi", "bebek", "tuna",
                "salmon", "lele", "gurame", "bandeng", "tongkol", "patin", "teri", "pindang",
                "ati", "ampela", "kerang",
            ],
            FoodCategory::PlantProtein => &["tahu", "tempe", "oncom", "kacang", "edamame"],
            FoodCategory::Vegetable => &[
                "bayam", "kangkung", "sawi", "brokoli", "wortel", "kacang panjang", "terong",
                "labu", "timun", "tomat", "tauge", "buncis", "capcay", "tumis", "sayur", "gado",
                "pecel", "urap", "lalapan", "pare", "oyong", "daun singkong", "nangka",
            ],
            FoodCategory::Fruit => &[
                "pisang", "apel", "jeruk", "pepaya", "mangga", "semangka", "melon", "anggur",
                "alpukat", "nanas", "jambu", "salak", "pir", "buah naga",
            ],
        }
    }

    /// Maximum records sampled into the reference table.
    pub fn cap(self) -> usize {
        match self {
            FoodCategory::Carbohydrate => 15,
            FoodCategory::AnimalProtein => 20,
            FoodCategory::PlantProtein => 10,
            FoodCategory::Vegetable => 15,
            FoodCategory::Fruit => 12,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            FoodCategory::Carbohydrate => "CARBOHYDRATES (main energy source)",
            FoodCategory::AnimalProtein => "ANIMAL PROTEIN (muscle building)",
            FoodCategory::PlantProtein => "PLANT PROTEIN (healthy alternative)",
            FoodCategory::Vegetable => "VEGETABLES (fibre and vitamins)",
            FoodCategory::Fruit => "FRUIT (vitamins and minerals)",
        }
    }

    /// Whether a lowercase name falls in this group.
    pub fn matches(self, lower_name: &str) -> bool {
        self.keywords().iter().any(|k| lower_name.contains(k))
    }
}

/// Randomised, capped sample of the corpus per food group.
///
/// Groups are not exclusive: a record matching several keyword lists may
/// appear in several groups.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet<'a> {
    pub carbohydrate: Vec<&'a FoodRecord>,
    pub animal_protein: Vec<&'a FoodRecord>,
    pub plant_protein: Vec<&'a FoodRecord>,
    pub vegetable: Vec<&'a FoodRecord>,
    pub fruit: Vec<&'a FoodRecord>,
}

impl<'a> ReferenceSet<'a> {
    pub fn category(&self, category: FoodCategory) -> &[&'a FoodRecord] {
        match category {
            FoodCategory::Carbohydrate => &self.carbohydrate,
            FoodCategory::AnimalProtein => &self.animal_protein,
            FoodCategory::PlantProtein => &self.plant_protein,
            FoodCategory::Vegetable => &self.vegetable,
            FoodCategory::Fruit => &self.fruit,
        }
    }

    fn category_mut(&mut self, category: FoodCategory) -> &mut Vec<&'a FoodRecord> {
        match category {
            FoodCategory::Carbohydrate => &mut self.carbohydrate,
            FoodCategory::AnimalProtein => &mut self.animal_protein,
            FoodCategory::PlantProtein => &mut self.plant_protein,
            FoodCategory::Vegetable => &mut self.vegetable,
            FoodCategory::Fruit => &mut self.fruit,
        }
    }

    pub fn len(&self) -> usize {
        FoodCategory::ALL.iter().map(|c| self.category(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable reference table embedded in the plan prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for category in FoodCategory::ALL {
            let _ = writeln!(out, "=== {} ===", category.heading());
            for food in self.category(category) {
                let _ = writeln!(
                    out,
                    "  • {}: {} kcal, P{}g, C{}g, F{}g (per 100g)",
                    food.name, food.calories, food.protein, food.carbs, food.fat
                );
            }
            out.push('\n');
        }
        out
    }
}

/// Build a fresh reference sample for one plan request.
///
/// Denylisted and non-positive-calorie records are dropped, each group is
/// shuffled independently and truncated to its cap. Must be called per
/// request so repeated plans surface different foods.
pub fn sample_reference_set<'a, R>(corpus: &'a Corpus, rng: &mut R) -> ReferenceSet<'a>
where
    R: Rng + ?Sized,
{
    let eligible: Vec<(String, &FoodRecord)> = corpus
        .iter()
        .filter(|f| f.calories > 0.0 && !is_denied(&f.name, REFERENCE_DENYLIST))
        .map(|f| (f.name.to_lowercase(), f))
        .collect();

    let mut set = ReferenceSet::default();
    for category in FoodCategory::ALL {
        let mut matched: Vec<&FoodRecord> = eligible
            .iter()
            .filter(|(lower, _)| category.matches(lower))
            .map(|(_, f)| *f)
            .collect();

        matched.shuffle(rng);
        matched.truncate(category.cap());
        *set.category_mut(category) = matched;
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn corpus() -> Corpus {
        vec![
            FoodRecord::new("Nasi Putih", 175.0, 3.0, 40.0, 0.3),
            FoodRecord::new("Nasi Goreng Ayam", 250.0, 9.0, 30.0, 10.0),
            FoodRecord::new("Ayam Goreng", 260.0, 27.0, 0.0, 16.0),
            FoodRecord::new("Daging Anak Sapi", 190.0, 20.0, 0.0, 12.0),
            FoodRecord::new("Bayam Mentah", 23.0, 2.9, 3.6, 0.4),
            FoodRecord::new("Tumis Kangkung", 98.0, 3.0, 5.0, 7.0),
            FoodRecord::new("Tempe Goreng", 336.0, 20.0, 7.8, 28.0),
            FoodRecord::new("Kacang Panjang Rebus", 35.0, 2.0, 7.0, 0.2),
            FoodRecord::new("Air Putih", 0.0, 0.0, 0.0, 0.0),
            FoodRecord::new("Pisang Ambon", 92.0, 1.2, 24.0, 0.2),
        ]
        .into()
    }

    fn names(records: &[&FoodRecord]) -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_categorisation_and_exclusions() {
        let corpus = corpus();
        let set = sample_reference_set(&corpus, &mut StdRng::seed_from_u64(1));

        assert_eq!(names(&set.carbohydrate), vec!["Nasi Goreng Ayam", "Nasi Putih"]);
        // "Daging Anak Sapi" is denylisted; "Nasi Goreng Ayam" matches "ayam" too.
        assert_eq!(names(&set.animal_protein), vec!["Ayam Goreng", "Nasi Goreng Ayam"]);
        assert_eq!(names(&set.plant_protein), vec!["Kacang Panjang Rebus", "Tempe Goreng"]);
        // "Bayam Mentah" is denylisted.
        assert_eq!(names(&set.vegetable), vec!["Kacang Panjang Rebus", "Tumis Kangkung"]);
        assert_eq!(names(&set.fruit), vec!["Pisang Ambon"]);
    }

    #[test]
    fn test_zero_calorie_records_are_dropped() {
        let corpus: Corpus = vec![FoodRecord::new("Sayur Bening", 0.0, 1.0, 2.0, 0.0)].into();
        let set = sample_reference_set(&corpus, &mut StdRng::seed_from_u64(3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_caps_are_applied() {
        let corpus: Corpus = (0..40)
            .map(|i| FoodRecord::new(format!("Ikan Bakar {}", i), 150.0, 20.0, 1.0, 6.0))
            .collect();
        let set = sample_reference_set(&corpus, &mut StdRng::seed_from_u64(9));

        assert_eq!(set.animal_protein.len(), FoodCategory::AnimalProtein.cap());
        assert!(set.carbohydrate.is_empty());
    }

    #[test]
    fn test_samples_vary_between_requests() {
        let corpus: Corpus = (0..60)
            .map(|i| FoodRecord::new(format!("Telur Dadar {}", i), 190.0, 13.0, 1.0, 15.0))
            .collect();
        let mut rng = StdRng::seed_from_u64(11);
        let first = names(&sample_reference_set(&corpus, &mut rng).animal_protein);
        let second = names(&sample_reference_set(&corpus, &mut rng).animal_protein);
        assert_ne!(first, second);
    }

    #[test]
    fn test_order_follows_injected_rng() {
        let corpus: Corpus = ["Jeruk Manis", "Apel Merah", "Pepaya", "Mangga"]
            .into_iter()
            .map(|n| FoodRecord::new(n, 50.0, 0.5, 12.0, 0.2))
            .collect();
        // All-zero draws rotate the head record to the back.
        let set = sample_reference_set(&corpus, &mut StepRng::new(0, 0));
        let order: Vec<&str> = set.fruit.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(order, vec!["Apel Merah", "Pepaya", "Mangga", "Jeruk Manis"]);
    }

    #[test]
    fn test_render_lists_every_heading() {
        let corpus = corpus();
        let rendered = sample_reference_set(&corpus, &mut StdRng::seed_from_u64(5)).render();

        for category in FoodCategory::ALL {
            assert!(rendered.contains(category.heading()));
        }
        assert!(rendered.contains("  • Nasi Putih: 175 kcal, P3g, C40g, F0.3g (per 100g)"));
    }
}
