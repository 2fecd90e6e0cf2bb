use derive_new::new;

// name / capacity の検証は行わない（capacity が 0 以下でも登録される）
#[derive(Debug, Clone, new)]
pub struct CreateSpace {
    pub name: String,
    pub capacity: i32,
}
