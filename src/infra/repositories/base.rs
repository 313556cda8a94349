//! Generic repository shared by every entity.
//!
//! A [`Repository`] is opened on a connection (the pool or an open
//! transaction) and offers the same six operations for every table. Reads
//! hand back a lazy [`Listing`] that can be narrowed and ordered before it
//! runs. Writes commit immediately on the connection they were opened on.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    Iterable, PaginatorTrait, PrimaryKeyTrait, QueryFilter, Select,
};

use super::query::{SearchFilter, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::types::{PageRequest, Paginated};

/// Row type stored behind an active model
pub type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// Entity behind an active model
pub type EntityOf<A> = <A as ActiveModelTrait>::Entity;

/// CRUD access to one table through `conn`.
pub struct Repository<'c, A, C> {
    conn: &'c C,
    _model: PhantomData<fn() -> A>,
}

impl<'c, A, C> Repository<'c, A, C> {
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            _model: PhantomData,
        }
    }
}

impl<'c, A, C> Repository<'c, A, C>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'c,
    ModelOf<A>: IntoActiveModel<A> + Send + Sync + 'c,
    C: ConnectionTrait,
{
    /// Every row, not yet executed
    pub fn get_all(&self) -> Listing<'c, EntityOf<A>, C> {
        Listing::new(<EntityOf<A> as EntityTrait>::find(), self.conn)
    }

    /// Rows matching `filter`, not yet executed
    pub fn get_by_search<F>(&self, filter: &F) -> Listing<'c, EntityOf<A>, C>
    where
        F: SearchFilter<EntityOf<A>>,
    {
        self.get_all().filter(filter)
    }

    /// Row with the given id; `None` when absent
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<ModelOf<A>>>
    where
        i32: Into<<<EntityOf<A> as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        <EntityOf<A> as EntityTrait>::find_by_id(id)
            .one(self.conn)
            .await
            .map_err(AppError::from)
    }

    /// Insert a new row and return it as stored
    pub async fn add(&self, model: A) -> AppResult<ModelOf<A>> {
        model.insert(self.conn).await.map_err(AppError::save_failed)
    }

    /// Write every column of `model` back to its row (last writer wins)
    pub async fn update(&self, model: ModelOf<A>) -> AppResult<ModelOf<A>> {
        let mut active = <ModelOf<A> as IntoActiveModel<A>>::into_active_model(model);
        for column in <EntityOf<A> as EntityTrait>::Column::iter() {
            if let Some(value) = active.get(column).into_value() {
                active.set(column, value);
            }
        }

        active.update(self.conn).await.map_err(AppError::save_failed)
    }

    /// Remove the row backing `model`
    pub async fn delete(&self, model: ModelOf<A>) -> AppResult<()> {
        <ModelOf<A> as IntoActiveModel<A>>::into_active_model(model)
            .delete(self.conn)
            .await
            .map_err(AppError::save_failed)?;
        Ok(())
    }
}

/// A query that has not run yet.
pub struct Listing<'c, E: EntityTrait, C> {
    select: Select<E>,
    conn: &'c C,
}

impl<'c, E, C> Listing<'c, E, C>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'c,
    C: ConnectionTrait,
{
    fn new(select: Select<E>, conn: &'c C) -> Self {
        Self { select, conn }
    }

    /// Narrow to rows matching `filter`
    pub fn filter<F: SearchFilter<E>>(mut self, filter: &F) -> Self {
        self.select = self.select.filter(filter.condition());
        self
    }

    /// Order the rows
    pub fn sort<S: SortOrder<E>>(mut self, order: S) -> Self {
        self.select = order.apply(self.select);
        self
    }

    pub async fn all(self) -> AppResult<Vec<E::Model>> {
        self.select.all(self.conn).await.map_err(AppError::from)
    }

    pub async fn one(self) -> AppResult<Option<E::Model>> {
        self.select.one(self.conn).await.map_err(AppError::from)
    }

    pub async fn count(self) -> AppResult<u64> {
        self.select.count(self.conn).await.map_err(AppError::from)
    }

    /// Run the query for one page, together with the total row count
    pub async fn page(self, request: PageRequest) -> AppResult<Paginated<E::Model>> {
        let paginator = self.select.paginate(self.conn, request.per_page);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(request.index()).await?;
        Ok(Paginated::new(data, request, total))
    }
}
