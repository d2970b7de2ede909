use chrono::Utc;
use contracts::domain::a001_category::{Category, CategoryDraft, CategoryId};
use contracts::domain::common::EntityMetadata;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::error::CatalogResult;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub icon: Option<String>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeUtc,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::a002_product::repository::Entity")]
    Products,
}

impl Related<crate::domain::a002_product::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(m: Model) -> Self {
        Category {
            id: CategoryId(m.id),
            name: m.name,
            icon: m.icon,
            lifecycle: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        }
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> CatalogResult<Vec<Category>> {
    let items = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Поиск по имени без учета регистра; при нескольких совпадениях
/// возвращается запись с наименьшим id
pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> CatalogResult<Option<Category>> {
    let key = name.trim().to_lowercase();
    let result = Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).eq(key))
        .order_by_asc(Column::Id)
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, draft: &CategoryDraft) -> CatalogResult<Category> {
    let now = Utc::now();
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(draft.name.trim().to_string()),
        icon: Set(draft.icon.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn update_icon<C: ConnectionTrait>(
    db: &C,
    id: CategoryId,
    icon: &str,
) -> CatalogResult<bool> {
    let result = Entity::update_many()
        .col_expr(Column::Icon, Expr::value(icon))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.0))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn count<C: ConnectionTrait>(db: &C) -> CatalogResult<u64> {
    Ok(Entity::find().count(db).await?)
}
