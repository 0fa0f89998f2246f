//! Ingredient catalog entities.

/// A catalog ingredient. `(name, measurement_unit)` pairs are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Input data for creating a catalog ingredient (fixture loading only).
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient as it appears inside a recipe, with its quantity.
#[derive(Debug, Clone)]
pub struct IngredientAmount {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i16,
}

/// One aggregated line of a shopping list: total quantity of an
/// ingredient over every recipe in the cart.
#[derive(Debug, Clone)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}
