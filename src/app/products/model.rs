//! 产品数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 创建产品请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    #[serde(default)]
    pub description: Option<String>,
}

/// 更新产品请求，未给出的字段保持不变
///
/// 请求体里的 `id`、`createdAt`、`updatedAt` 以及未知字段都会被忽略。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,

    pub description: Option<String>,
}

impl NewProduct {
    /// 去掉首尾空白，纯空白的名称随后会被校验拒绝
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = self.description.map(|d| d.trim().to_string());
        self
    }
}

impl ProductPatch {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.description = self.description.map(|d| d.trim().to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected_after_normalize() {
        let product = NewProduct {
            name: "   ".to_string(),
            price: 1.0,
            description: None,
        }
        .normalized();
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = NewProduct {
            name: "Widget".to_string(),
            price: -1.0,
            description: None,
        };
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_zero_price_accepted() {
        let product = NewProduct {
            name: "Freebie".to_string(),
            price: 0.0,
            description: None,
        };
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_patch_ignores_immutable_fields() {
        let patch: ProductPatch = serde_json::from_str(
            r#"{"id":"abc","createdAt":"2020-01-01T00:00:00Z","price":50}"#,
        )
        .unwrap();
        assert_eq!(patch.price, Some(50.0));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let now = Utc::now();
        let product = Product {
            id: "1".to_string(),
            name: "Widget".to_string(),
            price: 2.5,
            description: None,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("description").is_none());
    }
}
