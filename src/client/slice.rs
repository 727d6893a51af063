use crate::api::{CustomerDto, Identified, ProductDto, StoreDto};
use crate::client::{ApiClient, ClientError};
use crate::services::{Customers, Products, Resource, Stores};

/// Request state of a slice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalType {
    #[default]
    Create,
    Edit,
}

/// Client-side state for one entity list: the last fetched items, the
/// status of the last request, and the modal flags the views drive.
///
/// Every action enters `Loading` first, which clears any previous error.
/// A failed fetch empties the list; any other failure leaves it alone.
pub struct Slice<R: Resource> {
    pub items: Vec<R::Dto>,
    pub status: Status,
    pub show_modal: bool,
    pub show_delete_modal: bool,
    pub modal_type: ModalType,
    pub selected: Option<R::Dto>,
}

impl<R: Resource> Default for Slice<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: Status::Idle,
            show_modal: false,
            show_delete_modal: false,
            modal_type: ModalType::Create,
            selected: None,
        }
    }
}

impl<R: Resource> Slice<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn find(&self, id: i64) -> Option<&R::Dto> {
        self.items.iter().find(|item| item.id() == id)
    }

    // Reducers

    pub fn open_create(&mut self) {
        self.modal_type = ModalType::Create;
        self.selected = None;
        self.show_modal = true;
    }

    pub fn open_edit(&mut self, item: R::Dto) {
        self.modal_type = ModalType::Edit;
        self.selected = Some(item);
        self.show_modal = true;
    }

    pub fn open_delete(&mut self, item: R::Dto) {
        self.selected = Some(item);
        self.show_delete_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
        self.show_delete_modal = false;
        self.selected = None;
    }

    pub fn clear_error(&mut self) {
        if matches!(self.status, Status::Failed(_)) {
            self.status = Status::Idle;
        }
    }

    // Request lifecycle

    fn pending(&mut self) {
        self.status = Status::Loading;
    }

    fn rejected(&mut self, err: &ClientError) {
        self.status = Status::Failed(err.user_message());
    }

    fn fetched(&mut self, items: Vec<R::Dto>) {
        self.items = items;
        self.status = Status::Succeeded;
    }

    fn fetch_rejected(&mut self, err: &ClientError) {
        self.items.clear();
        self.rejected(err);
    }

    fn created(&mut self, item: R::Dto) {
        self.items.push(item);
        self.status = Status::Succeeded;
    }

    fn updated(&mut self, item: R::Dto) {
        if let Some(slot) = self.items.iter_mut().find(|x| x.id() == item.id()) {
            *slot = item;
        }
        self.status = Status::Succeeded;
    }

    fn deleted(&mut self, id: i64) {
        self.items.retain(|x| x.id() != id);
        self.status = Status::Succeeded;
    }

    // Async actions

    pub async fn fetch(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        self.pending();
        match client.list::<R>().await {
            Ok(items) => {
                self.fetched(items);
                Ok(())
            }
            Err(e) => {
                self.fetch_rejected(&e);
                Err(e)
            }
        }
    }

    pub async fn create(
        &mut self,
        client: &ApiClient,
        payload: &R::Payload,
    ) -> Result<R::Dto, ClientError> {
        self.pending();
        match client.create::<R>(payload).await {
            Ok(item) => {
                self.created(item.clone());
                Ok(item)
            }
            Err(e) => {
                self.rejected(&e);
                Err(e)
            }
        }
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: i64,
        payload: &R::Payload,
    ) -> Result<R::Dto, ClientError> {
        self.pending();
        match client.update::<R>(id, payload).await {
            Ok(item) => {
                self.updated(item.clone());
                Ok(item)
            }
            Err(e) => {
                self.rejected(&e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> Result<(), ClientError> {
        self.pending();
        match client.delete::<R>(id).await {
            Ok(()) => {
                self.deleted(id);
                Ok(())
            }
            Err(e) => {
                self.rejected(&e);
                Err(e)
            }
        }
    }
}

/// What the sales view loads next to the sales list: the rows a sale's
/// product, customer and store are picked from.
#[derive(Debug, Clone, Default)]
pub struct SaleChoices {
    pub products: Vec<ProductDto>,
    pub customers: Vec<CustomerDto>,
    pub stores: Vec<StoreDto>,
}

impl SaleChoices {
    pub async fn load(client: &ApiClient) -> Result<Self, ClientError> {
        let (products, customers, stores) = tokio::try_join!(
            client.list::<Products>(),
            client.list::<Customers>(),
            client.list::<Stores>(),
        )?;
        Ok(Self {
            products,
            customers,
            stores,
        })
    }
}
