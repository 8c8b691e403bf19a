//! 预导入模块，方便使用

pub use super::addresses::{
    ActiveModel as AddressActiveModel, Entity as Addresses, Model as AddressModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::persons::{ActiveModel as PersonActiveModel, Entity as Persons, Model as PersonModel};
pub use super::seats::{ActiveModel as SeatActiveModel, Entity as Seats, Model as SeatModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
