use chrono::Utc;
use contracts::domain::a001_category::CategoryId;
use contracts::domain::a002_product::{Product, ProductDraft, ProductId};
use contracts::domain::common::EntityMetadata;
use contracts::enums::ProductStatus;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::error::CatalogResult;

/// SQLite limits bound parameters per statement; one row binds ~17 values.
const INSERT_CHUNK: usize = 50;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_name = "titleKannada")]
    pub title_kannada: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "descriptionKannada", column_type = "Text", nullable)]
    pub description_kannada: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    pub variety: Option<String>,
    #[sea_orm(column_name = "subVariety")]
    pub sub_variety: Option<String>,
    pub unit: Option<String>,
    #[sea_orm(column_name = "supplierId")]
    pub supplier_id: Option<i32>,
    #[sea_orm(column_name = "isService")]
    pub is_service: Option<bool>,
    #[sea_orm(column_name = "deliveryAvailable")]
    pub delivery_available: Option<bool>,
    #[sea_orm(column_name = "isTemplate")]
    pub is_template: Option<bool>,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub status: Option<String>,
    #[sea_orm(column_name = "CategoryId")]
    pub category_id: Option<i32>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeUtc,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::a001_category::repository::Entity",
        from = "Column::CategoryId",
        to = "crate::domain::a001_category::repository::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<crate::domain::a001_category::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: ProductId(m.id),
            title: m.title,
            title_kannada: m.title_kannada,
            description: m.description,
            description_kannada: m.description_kannada,
            price: m.price.unwrap_or(0.0),
            variety: m.variety,
            sub_variety: m.sub_variety,
            unit: m.unit,
            supplier_id: m.supplier_id,
            is_service: m.is_service.unwrap_or(false),
            delivery_available: m.delivery_available.unwrap_or(true),
            is_template: m.is_template.unwrap_or(false),
            metadata: m.metadata,
            // legacy rows use "approved" and free-form spellings
            status: ProductStatus::normalize(m.status.as_deref()),
            category_id: m.category_id.map(CategoryId),
            lifecycle: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

fn active_model(draft: &ProductDraft) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        title: Set(draft.title.clone()),
        title_kannada: Set(draft.title_kannada.clone()),
        description: Set(draft.description.clone()),
        description_kannada: Set(draft.description_kannada.clone()),
        price: Set(Some(draft.price)),
        variety: Set(draft.variety.clone()),
        sub_variety: Set(draft.sub_variety.clone()),
        unit: Set(draft.unit.clone()),
        supplier_id: Set(draft.supplier_id),
        is_service: Set(Some(draft.is_service)),
        delivery_available: Set(Some(draft.delivery_available)),
        is_template: Set(Some(draft.is_template)),
        metadata: Set(draft.metadata.clone()),
        status: Set(Some(draft.status.as_str().to_string())),
        category_id: Set(Some(draft.category_id.0)),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

fn scope_condition(category_id: Option<CategoryId>) -> Condition {
    match category_id {
        Some(id) => Condition::all().add(Column::CategoryId.eq(id.0)),
        None => Condition::all(),
    }
}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    category_id: Option<CategoryId>,
) -> CatalogResult<Vec<Product>> {
    let items = Entity::find()
        .filter(scope_condition(category_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Точное совпадение пары (title, CategoryId)
pub async fn find_by_title_and_category<C: ConnectionTrait>(
    db: &C,
    title: &str,
    category_id: CategoryId,
) -> CatalogResult<Option<Product>> {
    let result = Entity::find()
        .filter(Column::Title.eq(title))
        .filter(Column::CategoryId.eq(category_id.0))
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, draft: &ProductDraft) -> CatalogResult<Product> {
    let model = active_model(draft).insert(db).await?;
    Ok(model.into())
}

/// Пакетная вставка; возвращает число вставленных строк
pub async fn insert_many<C: ConnectionTrait>(
    db: &C,
    drafts: &[ProductDraft],
) -> CatalogResult<u64> {
    let mut inserted = 0u64;
    for chunk in drafts.chunks(INSERT_CHUNK) {
        Entity::insert_many(chunk.iter().map(active_model))
            .exec(db)
            .await?;
        inserted += chunk.len() as u64;
    }
    Ok(inserted)
}

pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[ProductId]) -> CatalogResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.iter().map(|id| id.0)))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_category<C: ConnectionTrait>(
    db: &C,
    category_id: CategoryId,
) -> CatalogResult<u64> {
    let result = Entity::delete_many()
        .filter(Column::CategoryId.eq(category_id.0))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Удалить товары, название которых начинается с `prefix` или совпадает
/// с одним из `exact`
pub async fn delete_by_title<C: ConnectionTrait>(
    db: &C,
    prefix: Option<&str>,
    exact: &[String],
) -> CatalogResult<u64> {
    let mut condition = Condition::any();
    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        condition = condition.add(Column::Title.starts_with(prefix));
    }
    if !exact.is_empty() {
        condition = condition.add(Column::Title.is_in(exact.iter().cloned()));
    }
    if condition.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many().filter(condition).exec(db).await?;
    Ok(result.rows_affected)
}

/// isService = true, deliveryAvailable = true для всех товаров категории
pub async fn mark_service<C: ConnectionTrait>(
    db: &C,
    category_id: CategoryId,
) -> CatalogResult<u64> {
    let result = Entity::update_many()
        .col_expr(Column::IsService, Expr::value(true))
        .col_expr(Column::DeliveryAvailable, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::CategoryId.eq(category_id.0))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn count<C: ConnectionTrait>(
    db: &C,
    category_id: Option<CategoryId>,
) -> CatalogResult<u64> {
    let total = Entity::find()
        .filter(scope_condition(category_id))
        .count(db)
        .await?;
    Ok(total)
}
