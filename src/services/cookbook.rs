//! Recipes, ingredients and recipe summaries.
//!
//! A cookbook holds two kinds of entries, recipes and ingredients, under one
//! namespace of names. A recipe lists required items by name; each item is
//! either an ingredient or another recipe. A summary expands nested recipes
//! down to ingredients and totals their cook time.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Cleans up a handwritten recipe name.
///
/// `-` and `_` become spaces, anything that is neither a letter nor
/// whitespace is dropped, runs of whitespace collapse to one space and every
/// word is capitalised: `"Riz@z RISO00tto!"` becomes `"Rizz Risotto"`.
pub fn parse_handwriting(input: &str) -> Result<String> {
    let kept: String = input
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    let name = kept
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        return Err(Error::InvalidRecipeName {
            input: input.to_string(),
        });
    }
    Ok(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(rename = "requiredItems")]
    pub required_items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(rename = "cookTime")]
    pub cook_time: u64,
}

/// A cookbook entry as it appears on the wire, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Recipe(Recipe),
    Ingredient(Ingredient),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Recipe(recipe) => &recipe.name,
            Entry::Ingredient(ingredient) => &ingredient.name,
        }
    }

    /// A recipe may list each required item only once.
    pub fn validate(&self) -> Result<()> {
        if let Entry::Recipe(recipe) = self {
            let mut seen = HashSet::new();
            for item in &recipe.required_items {
                if !seen.insert(item.name.as_str()) {
                    return Err(Error::DuplicateRequiredItem {
                        recipe: recipe.name.clone(),
                        item: item.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Deserializes and validates one entry.
///
/// Unknown `type` tags, missing fields and a negative or non-integer
/// `cookTime` surface as [`Error::Json`].
pub fn parse_entry(value: JsonValue) -> Result<Entry> {
    let entry: Entry = serde_json::from_value(value)?;
    entry.validate()?;
    Ok(entry)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub name: String,
    #[serde(rename = "cookTime")]
    pub cook_time: u64,
    pub ingredients: Vec<Item>,
}

#[derive(Debug, Clone, Default)]
pub struct Cookbook {
    recipes: HashMap<String, Recipe>,
    ingredients: HashMap<String, Ingredient>,
}

impl Cookbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self> {
        let mut cookbook = Self::new();
        for entry in entries {
            cookbook.add_entry(entry)?;
        }
        Ok(cookbook)
    }

    /// Builds a cookbook from a JSON array of entries.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let values: Vec<JsonValue> = serde_json::from_str(input)?;
        let entries = values
            .into_iter()
            .map(parse_entry)
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.recipes.len() + self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name) || self.ingredients.contains_key(name)
    }

    pub fn add_entry(&mut self, entry: Entry) -> Result<()> {
        entry.validate()?;
        if self.contains(entry.name()) {
            return Err(Error::DuplicateEntry {
                name: entry.name().to_string(),
            });
        }

        tracing::debug!(name = entry.name(), "cookbook entry added");
        match entry {
            Entry::Recipe(recipe) => {
                self.recipes.insert(recipe.name.clone(), recipe);
            }
            Entry::Ingredient(ingredient) => {
                self.ingredients.insert(ingredient.name.clone(), ingredient);
            }
        }
        Ok(())
    }

    /// Expands `recipe_name` down to ingredients. Quantities of a nested
    /// recipe are scaled by how many of it the parent requires. Ingredients
    /// come out in the order they are first reached.
    pub fn ingredient_quantities(&self, recipe_name: &str) -> Result<Vec<Item>> {
        let recipe = self.recipe(recipe_name)?;
        let mut totals = Vec::new();
        let mut path = Vec::new();
        self.expand(recipe, 1, &mut totals, &mut path)?;
        Ok(totals)
    }

    pub fn summary(&self, recipe_name: &str) -> Result<RecipeSummary> {
        let ingredients = self.ingredient_quantities(recipe_name)?;

        let cook_time = ingredients.iter().try_fold(0u64, |total, item| {
            // every name in `ingredients` was resolved by `expand`
            let cook_time = self.ingredients[&item.name].cook_time;
            cook_time
                .checked_mul(item.quantity)
                .and_then(|time| total.checked_add(time))
                .ok_or(Error::Overflow)
        })?;

        tracing::info!(
            recipe = recipe_name,
            cook_time,
            ingredients = ingredients.len(),
            "recipe summarised"
        );
        Ok(RecipeSummary {
            name: recipe_name.to_string(),
            cook_time,
            ingredients,
        })
    }

    fn recipe(&self, name: &str) -> Result<&Recipe> {
        match self.recipes.get(name) {
            Some(recipe) => Ok(recipe),
            None if self.ingredients.contains_key(name) => Err(Error::NotARecipe {
                name: name.to_string(),
            }),
            None => Err(Error::RecipeNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn expand<'a>(
        &'a self,
        recipe: &'a Recipe,
        multiplier: u64,
        totals: &mut Vec<Item>,
        path: &mut Vec<&'a str>,
    ) -> Result<()> {
        if path.contains(&recipe.name.as_str()) {
            return Err(Error::RecipeCycle {
                name: recipe.name.clone(),
            });
        }
        path.push(&recipe.name);

        for item in &recipe.required_items {
            let quantity = item
                .quantity
                .checked_mul(multiplier)
                .ok_or(Error::Overflow)?;

            if self.ingredients.contains_key(&item.name) {
                match totals.iter_mut().find(|total| total.name == item.name) {
                    Some(total) => {
                        total.quantity = total
                            .quantity
                            .checked_add(quantity)
                            .ok_or(Error::Overflow)?;
                    }
                    None => totals.push(Item::new(item.name.clone(), quantity)),
                }
            } else if let Some(child) = self.recipes.get(&item.name) {
                self.expand(child, quantity, totals, path)?;
            } else {
                return Err(Error::MissingItem {
                    recipe: recipe.name.clone(),
                    item: item.name.clone(),
                });
            }
        }

        path.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(name: &str, items: &[(&str, u64)]) -> Entry {
        Entry::Recipe(Recipe {
            name: name.to_string(),
            required_items: items.iter().map(|(n, q)| Item::new(*n, *q)).collect(),
        })
    }

    fn ingredient(name: &str, cook_time: u64) -> Entry {
        Entry::Ingredient(Ingredient {
            name: name.to_string(),
            cook_time,
        })
    }

    fn burger_cookbook(ingredients: &[(&str, u64)]) -> Cookbook {
        let mut entries = vec![
            recipe("Burger", &[("Bun", 1), ("Patty", 1), ("Tomato", 2)]),
            recipe("Patty", &[("Beef", 3)]),
            recipe("Fries", &[("Potato", 5)]),
        ];
        entries.extend(ingredients.iter().map(|(n, t)| ingredient(n, *t)));
        Cookbook::from_entries(entries).unwrap()
    }

    #[test]
    fn test_parse_handwriting() {
        let cases = [
            ("Riz@z RISO00tto!", "Rizz Risotto"),
            ("meatball", "Meatball"),
            ("Skibidi spaghetti", "Skibidi Spaghetti"),
            ("alpHa alFRedo", "Alpha Alfredo"),
            ("Skibidi   spaghetti", "Skibidi Spaghetti"),
            ("Skibidi spaghetti    ", "Skibidi Spaghetti"),
            ("Skibidi___Spaghetti  ", "Skibidi Spaghetti"),
            ("  HellO-_ World", "Hello World"),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_handwriting(input).unwrap(), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_parse_handwriting_empty_result() {
        for input in ["", "   ", "123 !!", "-_-"] {
            assert!(matches!(
                parse_handwriting(input),
                Err(Error::InvalidRecipeName { .. })
            ));
        }
    }

    #[test]
    fn test_parse_entry_recipe() {
        let entry = parse_entry(json!({
            "type": "recipe",
            "name": "Sussy Salad",
            "requiredItems": [
                {"name": "Mayonaise", "quantity": 1},
                {"name": "Lettuce", "quantity": 3},
            ],
        }))
        .unwrap();
        assert_eq!(
            entry,
            recipe("Sussy Salad", &[("Mayonaise", 1), ("Lettuce", 3)])
        );

        let entry = parse_entry(json!({
            "type": "recipe",
            "name": "Mayonaise",
            "requiredItems": [{"name": "Egg", "quantity": 1}],
        }))
        .unwrap();
        assert_eq!(entry, recipe("Mayonaise", &[("Egg", 1)]));
    }

    #[test]
    fn test_parse_entry_ingredient() {
        let entry = parse_entry(json!({"type": "ingredient", "name": "Egg", "cookTime": 6}));
        assert_eq!(entry.unwrap(), ingredient("Egg", 6));

        let entry = parse_entry(json!({"type": "ingredient", "name": "Lettuce", "cookTime": 0}));
        assert_eq!(entry.unwrap(), ingredient("Lettuce", 0));
    }

    #[test]
    fn test_parse_entry_rejects_bad_entries() {
        let bad = [
            json!({"type": "other", "name": "Lettuce", "cookTime": 0}),
            json!({"type": "ingredient", "name": "Lettuce", "cookTime": -1}),
            json!({"type": "ingredient", "name": "Lettuce", "cookTime": 1.5}),
            json!({"type": "ingredient", "name": "Lettuce", "cookTime": "3"}),
            json!({"type": "ingredient", "name": "Lettuce"}),
        ];
        for value in bad {
            assert!(matches!(parse_entry(value), Err(Error::Json(_))));
        }
    }

    #[test]
    fn test_parse_entry_rejects_duplicate_required_items() {
        let err = parse_entry(json!({
            "type": "recipe",
            "name": "Mayonaise",
            "requiredItems": [
                {"name": "Egg", "quantity": 1},
                {"name": "Other", "quantity": 2},
                {"name": "Egg", "quantity": 2},
            ],
        }))
        .unwrap_err();
        match err {
            Error::DuplicateRequiredItem { recipe, item } => {
                assert_eq!((recipe.as_str(), item.as_str()), ("Mayonaise", "Egg"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_entry_serializes_with_type_tag() {
        assert_eq!(
            serde_json::to_value(ingredient("Egg", 6)).unwrap(),
            json!({"type": "ingredient", "name": "Egg", "cookTime": 6})
        );
    }

    #[test]
    fn test_add_entry_names_are_unique() {
        let mut cookbook =
            Cookbook::from_entries([recipe("Burger", &[]), recipe("Fries", &[])]).unwrap();
        assert!(matches!(
            cookbook.add_entry(recipe("Burger", &[])),
            Err(Error::DuplicateEntry { .. })
        ));

        let mut cookbook = Cookbook::from_entries([
            recipe("Burger", &[]),
            recipe("Fries", &[("Potato", 5)]),
            ingredient("Potato", 6),
        ])
        .unwrap();
        assert!(matches!(
            cookbook.add_entry(recipe("Potato", &[])),
            Err(Error::DuplicateEntry { .. })
        ));
        assert_eq!(cookbook.len(), 3);
    }

    #[test]
    fn test_summary_burger() {
        let cookbook = burger_cookbook(&[("Bun", 1), ("Beef", 5), ("Tomato", 2), ("Potato", 6)]);

        assert_eq!(
            cookbook.summary("Burger").unwrap(),
            RecipeSummary {
                name: "Burger".to_string(),
                cook_time: 20,
                ingredients: vec![Item::new("Bun", 1), Item::new("Beef", 3), Item::new("Tomato", 2)],
            }
        );
    }

    #[test]
    fn test_summary_unknown_name() {
        let cookbook = Cookbook::from_entries([recipe("Burger", &[])]).unwrap();
        assert!(matches!(
            cookbook.summary("Non existant"),
            Err(Error::RecipeNotFound { .. })
        ));
    }

    #[test]
    fn test_summary_of_an_ingredient() {
        let cookbook =
            Cookbook::from_entries([recipe("Burger", &[]), ingredient("Potato", 6)]).unwrap();
        assert!(matches!(
            cookbook.summary("Potato"),
            Err(Error::NotARecipe { .. })
        ));
    }

    #[test]
    fn test_summary_missing_items() {
        let without_tomato = burger_cookbook(&[("Bun", 1), ("Beef", 5), ("Potato", 6)]);
        match without_tomato.summary("Burger").unwrap_err() {
            Error::MissingItem { recipe, item } => {
                assert_eq!((recipe.as_str(), item.as_str()), ("Burger", "Tomato"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let without_beef = burger_cookbook(&[("Bun", 1), ("Tomato", 2), ("Potato", 6)]);
        match without_beef.summary("Burger").unwrap_err() {
            Error::MissingItem { recipe, item } => {
                assert_eq!((recipe.as_str(), item.as_str()), ("Patty", "Beef"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_summary_scales_nested_recipes() {
        let cookbook = Cookbook::from_entries([
            recipe("Double", &[("Patty", 2), ("Beef", 1)]),
            recipe("Patty", &[("Beef", 3)]),
            ingredient("Beef", 5),
        ])
        .unwrap();

        let summary = cookbook.summary("Double").unwrap();
        assert_eq!(summary.ingredients, vec![Item::new("Beef", 7)]);
        assert_eq!(summary.cook_time, 35);
    }

    #[test]
    fn test_summary_detects_cycles() {
        let cookbook = Cookbook::from_entries([
            recipe("Chicken", &[("Egg", 1)]),
            recipe("Egg", &[("Chicken", 1)]),
        ])
        .unwrap();
        assert!(matches!(
            cookbook.summary("Chicken"),
            Err(Error::RecipeCycle { .. })
        ));
    }

    #[test]
    fn test_shared_sub_recipe_is_not_a_cycle() {
        let cookbook = Cookbook::from_entries([
            recipe("Meal", &[("Sauce", 1), ("Pasta", 1)]),
            recipe("Pasta", &[("Sauce", 1), ("Flour", 2)]),
            recipe("Sauce", &[("Tomato", 2)]),
            ingredient("Tomato", 3),
            ingredient("Flour", 1),
        ])
        .unwrap();

        let summary = cookbook.summary("Meal").unwrap();
        assert_eq!(
            summary.ingredients,
            vec![Item::new("Tomato", 4), Item::new("Flour", 2)]
        );
        assert_eq!(summary.cook_time, 14);
    }

    #[test]
    fn test_summary_cook_time_overflow() {
        let cookbook = Cookbook::from_entries([
            recipe("Feast", &[("Ox", u64::MAX)]),
            ingredient("Ox", 2),
        ])
        .unwrap();
        assert!(matches!(cookbook.summary("Feast"), Err(Error::Overflow)));
    }
}
