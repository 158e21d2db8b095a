pub mod aggregate;

pub use aggregate::{
    MoveDirection, Product, ProductCreateDto, ProductId, ProductMoveRequest, ProductUpdateDto,
};
