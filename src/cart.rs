// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Shopping cart price calculator.
//!
//! Stock lives in an explicit [`Inventory`] that carts borrow when adding
//! items. Carts sharing an inventory draw from the same stock; separate
//! inventories never interfere.
//!
//! # Example
//!
//! ```
//! use bank_demo_rs::{Inventory, ShoppingCart};
//! use rust_decimal_macros::dec;
//!
//! let mut inventory = Inventory::apple_store();
//! let mut cart = ShoppingCart::new();
//! cart.add_item(&mut inventory, "iphone", 2).unwrap();
//! assert_eq!(cart.total_cost(), dec!(1800));
//! assert_eq!(inventory.stock("iphone"), Some(3));
//! ```

use crate::CartError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Product {
    stock: u32,
    unit_price: Decimal,
}

/// Product stock and unit prices.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: BTreeMap<String, Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo catalog: iphone, imac, ipad and iwatch.
    pub fn apple_store() -> Self {
        let mut inventory = Self::new();
        inventory.restock("iphone", 5, dec!(900));
        inventory.restock("imac", 3, dec!(5000));
        inventory.restock("ipad", 2, dec!(3000));
        inventory.restock("iwatch", 1, dec!(4000));
        inventory
    }

    /// Adds `quantity` units of `name` and sets its unit price.
    ///
    /// Stock saturates at `u32::MAX`.
    pub fn restock(&mut self, name: &str, quantity: u32, unit_price: Decimal) {
        let product = self.products.entry(name.to_owned()).or_insert(Product {
            stock: 0,
            unit_price,
        });
        product.stock = product.stock.saturating_add(quantity);
        product.unit_price = unit_price;
    }

    pub fn stock(&self, name: &str) -> Option<u32> {
        self.products.get(name).map(|p| p.stock)
    }

    pub fn price(&self, name: &str) -> Option<Decimal> {
        self.products.get(name).map(|p| p.unit_price)
    }

    /// Removes `quantity` units and returns the unit price.
    fn take(&mut self, name: &str, quantity: u32) -> Result<Decimal, CartError> {
        let product = self
            .products
            .get_mut(name)
            .ok_or_else(|| CartError::UnknownProduct(name.to_owned()))?;
        if quantity > product.stock {
            return Err(CartError::OutOfStock {
                product: name.to_owned(),
                requested: quantity,
                available: product.stock,
            });
        }
        product.stock -= quantity;
        Ok(product.unit_price)
    }
}

/// One cart line. Price is fixed when the line is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct ShoppingCart {
    items: Vec<CartItem>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes `quantity` units from `inventory` and appends a cart line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] - `quantity` is zero.
    /// - [`CartError::UnknownProduct`] - `name` is not stocked.
    /// - [`CartError::OutOfStock`] - fewer than `quantity` units remain.
    pub fn add_item(
        &mut self,
        inventory: &mut Inventory,
        name: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let unit_price = inventory.take(name, quantity)?;
        self.items.push(CartItem {
            name: name.to_owned(),
            quantity,
            unit_price,
        });
        tracing::debug!(product = name, quantity, "added to cart");
        Ok(())
    }

    /// Removes one unit of `name`, dropping the line when it reaches zero.
    ///
    /// Removed units are not returned to the inventory. Returns `false` if
    /// the cart holds no such product.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.name == name) else {
            return false;
        };
        if self.items[index].quantity == 1 {
            self.items.remove(index);
        } else {
            self.items[index].quantity -= 1;
        }
        true
    }

    pub fn total_cost(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
}
