use std::{fmt::Display, marker::PhantomData};

use crate::{
    client::{response::ApiResponse, Call, RequestSpec, AUTHORS_BY_BOOK_ID_PATH},
    traits::Resource,
    types::{author::Author, book::Book},
    Result,
};

/// List/get/create/update/delete for one resource collection.
pub struct CrudService<R> {
    spec:     RequestSpec,
    resource: PhantomData<fn() -> R>,
}

pub type BookService = CrudService<Book>;
pub type AuthorService = CrudService<Author>;

impl<R: Resource> CrudService<R> {
    pub fn new(spec: RequestSpec) -> Self {
        Self {
            spec,
            resource: PhantomData,
        }
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub async fn get_all(&self) -> Result<ApiResponse> {
        let call = Call::get(R::COLLECTION_PATH)
            .step(format!("Get all {} (no query params)", R::NAME_PLURAL));
        self.spec.send(call).await
    }

    /// Like [`get_all`](Self::get_all), with `params` as the query string.
    pub async fn get_all_with<K, V>(
        &self,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ApiResponse>
    where
        K: Into<String>,
        V: Display,
    {
        let call = Call::get(R::COLLECTION_PATH)
            .query_params(params)
            .step(format!("Get all {} with optional query params", R::NAME_PLURAL));
        self.spec.send(call).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse> {
        let call = Call::get(R::ITEM_PATH)
            .path_param("id", id)
            .step(format!("Get {} by ID: {id}", R::NAME));
        self.spec.send(call).await
    }

    pub async fn create(&self, resource: &R) -> Result<ApiResponse> {
        let call = Call::post(R::COLLECTION_PATH)
            .json(resource)?
            .step(format!("Create new {}: {}", R::NAME, resource.describe()));
        self.spec.send(call).await
    }

    pub async fn update(&self, id: i32, resource: &R) -> Result<ApiResponse> {
        let call = Call::put(R::ITEM_PATH)
            .path_param("id", id)
            .json(resource)?
            .step(format!("Update {} with ID: {id}", R::NAME));
        self.spec.send(call).await
    }

    pub async fn delete(&self, id: i32) -> Result<ApiResponse> {
        let call = Call::delete(R::ITEM_PATH)
            .path_param("id", id)
            .step(format!("Delete {} with ID: {id}", R::NAME));
        self.spec.send(call).await
    }
}

impl AuthorService {
    /// Authors whose `idBook` matches. An unknown book gives `200 []`.
    pub async fn get_by_book_id(&self, id_book: i32) -> Result<ApiResponse> {
        let call = Call::get(AUTHORS_BY_BOOK_ID_PATH)
            .path_param("idBook", id_book)
            .step(format!("Get authors by book ID: {id_book}"));
        self.spec.send(call).await
    }
}

impl<R> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self {
            spec:     self.spec.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for CrudService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudService")
            .field("resource", &R::NAME_PLURAL)
            .field("spec", &self.spec)
            .finish()
    }
}
