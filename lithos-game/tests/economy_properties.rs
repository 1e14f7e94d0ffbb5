use lithos_game::{
    Companion, CompanionRoster, CraftOptions, CraftResult, GameConfig, GameError, GameState,
    Inventory, ItemKind, Material, Place, PlaceDrops, Recipe, common_chance, get_materials,
    recipe_cost,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn drops(gacha: bool, common: &[(Material, u32)], rare: &[(Material, u32)]) -> PlaceDrops {
    PlaceDrops {
        place: if gacha { Place::DeepSeaShore } else { Place::River },
        gacha,
        common: common.iter().copied().collect(),
        rare: rare.iter().copied().collect(),
    }
}

fn hit_rate(table: &PlaceDrops, rate: u32, multiplier: f64, trials: u32, seed: u64) -> f64 {
    let cfg = GameConfig::default();
    let mut inv = Inventory::default();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let hits = (0..trials)
        .filter(|_| !get_materials(table, rate, multiplier, &mut inv, &cfg, &mut rng).found.is_empty())
        .count();
    hits as f64 / f64::from(trials)
}

#[test]
fn fifty_percent_roll_lands_in_band() {
    let rare = drops(false, &[], &[(Material::Gold, 50)]);
    let observed = hit_rate(&rare, 50, 1.0, 100_000, 0xC0FFEE);
    assert!((0.45..=0.55).contains(&observed), "rare w=50 observed {observed}");

    // Common entries halve the weight before rolling.
    assert_eq!(common_chance(100, 50, 1.0), 50);
    let common = drops(false, &[(Material::Stone, 100)], &[]);
    let observed = hit_rate(&common, 50, 1.0, 100_000, 0xBEEF);
    assert!((0.45..=0.55).contains(&observed), "common w=100 observed {observed}");
}

#[test]
fn common_weight_fifty_at_base_rate_is_a_quarter() {
    assert_eq!(common_chance(50, 50, 1.0), 25);
    let common = drops(false, &[(Material::Stone, 50)], &[]);
    let observed = hit_rate(&common, 50, 1.0, 100_000, 0xFACE);
    assert!((0.22..=0.28).contains(&observed), "observed {observed}");
}

#[test]
fn gacha_pays_out_once_per_three_distinct_finds() {
    let cfg = GameConfig::default();
    let mut inv = Inventory::default();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    // x5 saturates the 20% base chance.
    let multiplier = 5.0;

    let mut bonuses = 0;
    for (step, material) in [
        Material::Salt,
        Material::Coral,
        Material::Pearl,
        Material::Sulfur,
    ]
    .into_iter()
    .enumerate()
    {
        let table = drops(true, &[(material, 20)], &[]);
        let roll = get_materials(&table, 65, multiplier, &mut inv, &cfg, &mut rng);
        assert!(roll.found.contains(&material));
        if roll.gacha_bonus {
            bonuses += 1;
            assert_eq!(step, 2, "bonus must land on the third distinct find");
            assert_eq!(roll.found.last(), Some(&Material::Painite));
            assert!(inv.deep_sea_finds().is_empty());
        }
    }
    assert_eq!(bonuses, 1);
    assert_eq!(inv.deep_sea_finds().len(), 1);
}

#[test]
fn repeated_finds_do_not_fill_the_tracker() {
    let cfg = GameConfig::default();
    let mut inv = Inventory::default();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let table = drops(true, &[(Material::Coral, 20)], &[]);
    for _ in 0..10 {
        let roll = get_materials(&table, 65, 5.0, &mut inv, &cfg, &mut rng);
        assert!(!roll.gacha_bonus);
    }
    assert_eq!(inv.deep_sea_finds().len(), 1);
}

#[test]
fn over_removal_fails_without_side_effects() {
    let mut inv = Inventory::default();
    inv.add_material(Material::Wood, 2);
    inv.add_material(Material::Stone, 1);
    let snapshot = inv.clone();

    assert!(inv.remove_material(Material::Wood, 3).is_err());
    assert!(inv.remove_all(&[(Material::Stone, 1), (Material::Wood, 5)]).is_err());
    assert!(inv.remove_all(&[(Material::Wood, 1), (Material::Wood, 2)]).is_err());
    assert_eq!(inv, snapshot);

    assert_eq!(inv.remove_material(Material::Wood, 2), Ok(0));
    assert!(!inv.has_material(Material::Wood));
}

#[test]
fn exactly_one_companion_after_any_revival_sequence() {
    let mut roster = CompanionRoster::default();
    let mut inv = Inventory::default();
    let order = [
        Companion::Akio,
        Companion::Kino,
        Companion::Kino,
        Companion::Bem,
        Companion::Akio,
        Companion::Bem,
    ];
    for companion in order {
        roster.revive(companion, &mut inv);
        let active = Companion::ALL
            .iter()
            .filter(|c| roster.is_active(**c))
            .count();
        assert_eq!(active, 1);
        assert_eq!(inv.double_yield(), companion == Companion::Kino);
    }
}

#[test]
fn every_rolled_recipe_spends_its_cost_on_both_outcomes() {
    let cfg = GameConfig::default();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let mut saw_failure = false;
    let mut saw_success = false;
    for _ in 0..200 {
        let mut state = GameState::new(&cfg);
        state.inventory.add_material(Material::Wood, 1);
        state.inventory.add_material(Material::Stone, 1);
        let report = lithos_game::crafting::craft(
            &mut state,
            &cfg,
            Recipe::Spear,
            CraftOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert!(state.inventory.materials().is_empty());
        if report.result.is_success() {
            saw_success = true;
            assert_eq!(state.inventory.count_items(ItemKind::Spear), 1);
        } else {
            saw_failure = true;
            assert_eq!(state.inventory.crafted_count(), 0);
        }
    }
    assert!(saw_failure && saw_success);
}

fn stocked_for(recipe: Recipe, options: CraftOptions, rng: &mut ChaCha20Rng) -> GameState {
    let forced = GameConfig {
        craft_success_pct: 100,
        ..GameConfig::default()
    };
    let mut state = GameState::new(&forced);
    if recipe.required_structure().is_some() {
        for material in [Material::Stone, Material::Wood, Material::Painite] {
            state.inventory.add_material(material, 1);
        }
        lithos_game::crafting::craft(
            &mut state,
            &forced,
            Recipe::AlchemyTable,
            CraftOptions::default(),
            rng,
        )
        .unwrap();
    }
    for (material, qty) in recipe_cost(recipe, options) {
        state.inventory.add_material(material, qty + 2);
    }
    state
}

#[test]
fn rolled_recipes_spend_exactly_their_cost_either_way() {
    let mut rng = ChaCha20Rng::seed_from_u64(23);
    for pct in [0, 100] {
        let cfg = GameConfig {
            craft_success_pct: pct,
            ..GameConfig::default()
        };
        for recipe in Recipe::ALL.into_iter().filter(|r| r.rolls_for_success()) {
            let options = CraftOptions {
                use_platinum: recipe == Recipe::RevivalPotion,
            };
            let cost = recipe_cost(recipe, options);
            let mut state = stocked_for(recipe, options, &mut rng);
            let before = state.inventory.clone();

            let report =
                lithos_game::crafting::craft(&mut state, &cfg, recipe, options, &mut rng).unwrap();
            assert_eq!(report.consumed, cost);
            assert_eq!(report.result.is_success(), pct == 100, "{recipe} at {pct}%");
            if pct == 0 {
                assert_eq!(report.result, CraftResult::Failure);
                assert_eq!(state.inventory.crafted_count(), before.crafted_count());
            }

            for material in Material::ALL {
                let spent: u32 = cost
                    .iter()
                    .filter(|(m, _)| *m == material)
                    .map(|(_, qty)| qty)
                    .sum();
                assert_eq!(
                    state.inventory.material_count(material),
                    before.material_count(material) - spent,
                    "{recipe} at {pct}% left the wrong amount of {material}"
                );
            }
        }
    }
}

#[test]
fn bem_makes_a_thousand_crafts_in_a_row() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(&cfg);
    state
        .companions
        .revive(Companion::Bem, &mut state.inventory);
    state.inventory.add_material(Material::Wood, 3000);
    let mut rng = ChaCha20Rng::seed_from_u64(22);
    for _ in 0..1000 {
        let report = lithos_game::crafting::craft(
            &mut state,
            &cfg,
            Recipe::WoodenBatea,
            CraftOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert!(report.result.is_success());
    }
    assert_eq!(state.inventory.count_items(ItemKind::WoodenBatea), 1000);
    assert_eq!(
        lithos_game::crafting::craft(
            &mut state,
            &cfg,
            Recipe::WoodenBatea,
            CraftOptions::default(),
            &mut rng,
        ),
        Err(GameError::InsufficientMaterials {
            action: "Wooden Batea",
            material: Material::Wood,
            needed: 3,
            available: 0,
        })
    );
}

#[test]
fn deep_sea_catalog_entries_share_one_flat_chance() {
    let catalog = lithos_game::PlaceCatalog::default_catalog();
    let deep = catalog.drops(Place::DeepSeaShore).unwrap();
    assert!(deep.gacha);
    assert_eq!(deep.common.len(), 4);
    assert!(deep.rare.is_empty());
}
