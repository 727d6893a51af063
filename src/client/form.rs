use rust_decimal::Decimal;
use std::str::FromStr;

use crate::api::{
    date, CustomerDto, CustomerPayload, FieldErrors, ProductDto, ProductPayload, SaleDto,
    SalePayload, StoreDto, StorePayload,
};
use crate::services::{Customers, Products, Resource, Sales, Stores};

/// Raw form input for one resource, as typed by the user.
///
/// `validate` is the client-side gate: when it fails nothing is sent.
pub trait Form: Sized {
    type Resource: Resource;

    /// Prefill for edit mode
    fn from_dto(dto: &<Self::Resource as Resource>::Dto) -> Self;

    /// `id` is set in edit mode and copied into the payload
    fn validate(
        &self,
        id: Option<i64>,
    ) -> Result<<Self::Resource as Resource>::Payload, FieldErrors>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreForm {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleForm {
    pub product_id: String,
    pub customer_id: String,
    pub store_id: String,
    pub date: String,
    pub quantity: String,
}

fn name(errors: &mut FieldErrors, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn reference(errors: &mut FieldErrors, field: &str, label: &str, raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(field.to_string(), format!("Please select a {}", label));
        return None;
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.insert(field.to_string(), format!("Invalid {} id '{}'", label, raw));
            None
        }
    }
}

fn into_result<P>(payload: Option<P>, errors: FieldErrors) -> Result<P, FieldErrors> {
    match payload {
        Some(payload) if errors.is_empty() => Ok(payload),
        _ => Err(errors),
    }
}

impl Form for CustomerForm {
    type Resource = Customers;

    fn from_dto(dto: &CustomerDto) -> Self {
        Self {
            name: dto.name.clone(),
            address: dto.address.clone(),
        }
    }

    fn validate(&self, id: Option<i64>) -> Result<CustomerPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let payload = name(&mut errors, &self.name).map(|name| CustomerPayload {
            id,
            name: Some(name),
            address: Some(self.address.trim().to_string()),
        });
        into_result(payload, errors)
    }
}

impl Form for StoreForm {
    type Resource = Stores;

    fn from_dto(dto: &StoreDto) -> Self {
        Self {
            name: dto.name.clone(),
            address: dto.address.clone(),
        }
    }

    fn validate(&self, id: Option<i64>) -> Result<StorePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let payload = name(&mut errors, &self.name).map(|name| StorePayload {
            id,
            name: Some(name),
            address: Some(self.address.trim().to_string()),
        });
        into_result(payload, errors)
    }
}

impl Form for ProductForm {
    type Resource = Products;

    fn from_dto(dto: &ProductDto) -> Self {
        Self {
            name: dto.name.clone(),
            price: dto.price.to_string(),
        }
    }

    fn validate(&self, id: Option<i64>) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = name(&mut errors, &self.name);

        let raw = self.price.trim();
        let price = if raw.is_empty() {
            errors.insert("price".to_string(), "Price is required".to_string());
            None
        } else {
            match Decimal::from_str(raw) {
                Ok(price) if price.is_sign_negative() && !price.is_zero() => {
                    errors.insert("price".to_string(), "Price cannot be negative".to_string());
                    None
                }
                Ok(price) => Some(price),
                Err(_) => {
                    errors.insert("price".to_string(), "Price must be a number".to_string());
                    None
                }
            }
        };

        let payload = name.zip(price).map(|(name, price)| ProductPayload {
            id,
            name: Some(name),
            price: Some(price),
        });
        into_result(payload, errors)
    }
}

impl Form for SaleForm {
    type Resource = Sales;

    fn from_dto(dto: &SaleDto) -> Self {
        Self {
            product_id: dto.product_id.to_string(),
            customer_id: dto.customer_id.to_string(),
            store_id: dto.store_id.to_string(),
            date: date::format(&dto.date),
            quantity: dto.quantity.to_string(),
        }
    }

    fn validate(&self, id: Option<i64>) -> Result<SalePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let product_id = reference(&mut errors, "productId", "product", &self.product_id);
        let customer_id = reference(&mut errors, "customerId", "customer", &self.customer_id);
        let store_id = reference(&mut errors, "storeId", "store", &self.store_id);

        let date = if self.date.trim().is_empty() {
            errors.insert("date".to_string(), "Please select a date".to_string());
            None
        } else {
            let parsed = date::parse(&self.date);
            if parsed.is_none() {
                errors.insert("date".to_string(), format!("Invalid date '{}'", self.date.trim()));
            }
            parsed.map(|date| date::format(&date))
        };

        let quantity = match self.quantity.trim().parse::<i64>() {
            Ok(quantity) if quantity > 0 => Some(quantity),
            _ => {
                errors.insert(
                    "quantity".to_string(),
                    "Quantity must be a positive whole number".to_string(),
                );
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SalePayload {
            id,
            product_id,
            customer_id,
            store_id,
            date,
            quantity,
        })
    }
}
