use super::Ingredient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish as listed on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishTemplate {
    pub name: String,
    pub price: Decimal,
    pub requirements: Vec<Ingredient>,
}

/// The read-only menu, sorted by dish name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Menu {
    dishes: Vec<DishTemplate>,
}

impl Menu {
    pub fn new(mut dishes: Vec<DishTemplate>) -> Self {
        dishes.sort_by(|a, b| a.name.cmp(&b.name));
        Self { dishes }
    }

    pub fn find(&self, name: &str) -> Option<&DishTemplate> {
        self.dishes.iter().find(|d| d.name == name)
    }

    pub fn dishes(&self) -> &[DishTemplate] {
        &self.dishes
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str) -> DishTemplate {
        DishTemplate {
            name: name.to_string(),
            price: Decimal::new(1000, 2),
            requirements: vec![],
        }
    }

    #[test]
    fn test_menu_sorted_by_name() {
        let menu = Menu::new(vec![template("Soup"), template("Pasta"), template("Burger")]);
        let names: Vec<&str> = menu.dishes().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Pasta", "Soup"]);
        assert!(menu.find("Pasta").is_some());
        assert!(menu.find("Pizza").is_none());
    }
}
