pub mod pedidos;
pub mod produtos;

pub use pedidos::Entity as Pedidos;
pub use produtos::Entity as Produtos;
