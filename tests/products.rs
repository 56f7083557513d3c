#[cfg(test)]
mod tests {
    use parking_lot::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tidvis::db::products::Products;
    use tidvis::libs::product::{Product, DEFAULT_UNIT};

    // Tests share the process-wide HOME override; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ProductTestContext {
        _temp_dir: TempDir,
        _env_guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ProductTestContext {
        fn setup() -> Self {
            let env_guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ProductTestContext {
                _temp_dir: temp_dir,
                _env_guard: env_guard,
            }
        }
    }

    #[test_context(ProductTestContext)]
    #[test]
    fn test_insert_and_fetch_product(_ctx: &mut ProductTestContext) {
        let mut products = Products::new().unwrap();
        let id = products.insert(&Product::new("Consulting", DEFAULT_UNIT, Some(1200.0))).unwrap();

        let product = products.fetch(id).unwrap().unwrap();
        assert_eq!(product.name, "Consulting");
        assert_eq!(product.unit, "hour");
        assert_eq!(product.rate, Some(1200.0));
    }

    #[test_context(ProductTestContext)]
    #[test]
    fn test_product_without_rate(_ctx: &mut ProductTestContext) {
        let mut products = Products::new().unwrap();
        let id = products.insert(&Product::new("Workshop", "day", None)).unwrap();

        let product = products.fetch(id).unwrap().unwrap();
        assert_eq!(product.unit, "day");
        assert!(product.rate.is_none());
    }

    #[test_context(ProductTestContext)]
    #[test]
    fn test_update_product(_ctx: &mut ProductTestContext) {
        let mut products = Products::new().unwrap();
        let id = products.insert(&Product::new("Support", DEFAULT_UNIT, Some(900.0))).unwrap();

        let mut product = products.fetch(id).unwrap().unwrap();
        product.rate = Some(950.0);
        products.update(id, &product).unwrap();

        let updated = products.fetch(id).unwrap().unwrap();
        assert_eq!(updated.rate, Some(950.0));
    }

    #[test_context(ProductTestContext)]
    #[test]
    fn test_delete_product(_ctx: &mut ProductTestContext) {
        let mut products = Products::new().unwrap();
        let id = products.insert(&Product::new("Discontinued", DEFAULT_UNIT, None)).unwrap();

        products.delete(id).unwrap();
        assert!(products.fetch(id).unwrap().is_none());
    }
}
