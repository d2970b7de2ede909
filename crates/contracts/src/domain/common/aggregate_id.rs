use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
///
/// Идентификаторы каталога назначаются хранилищем (целочисленный autoincrement),
/// поэтому все реализации оборачивают `i32`.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Значение первичного ключа в хранилище
    fn value(&self) -> i32;

    /// Преобразовать ID в строку
    fn as_string(&self) -> String {
        self.value().to_string()
    }

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for i32 {
    fn value(&self) -> i32 {
        *self
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i32>()
            .map_err(|e| format!("Invalid i32: {}", e))
    }
}

/// Объявляет newtype-идентификатор агрегата поверх `i32`
#[macro_export]
macro_rules! aggregate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            pub fn new(value: i32) -> Self {
                Self(value)
            }
        }

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i32 {
                self.0
            }

            fn from_string(s: &str) -> Result<Self, String> {
                <i32 as $crate::domain::common::AggregateId>::from_string(s).map($name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
