//! # Repository Registry
//!
//! `#[repository]` 매크로가 생성하는 싱글톤 리포지토리와, `main`에서 직접 등록하는
//! 인프라 컴포넌트(`Database`, `RedisClient`)를 보관하는 전역 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    └─ #[repository(name = "user")] → inventory::submit!(RepositoryRegistration)
//!
//! 2. 런타임 초기화 (main)
//!    ├─ ServiceLocator::set(Arc<Database>)
//!    ├─ ServiceLocator::set(Arc<RedisClient>)
//!    └─ ServiceLocator::initialize_all()   // 등록된 리포지토리 전부 생성
//!
//! 3. 의존성 주입
//!    └─ Arc<T> 필드 → ServiceLocator::get::<T>()
//! ```
//!
//! 서비스 계층은 저장소 트레이트(`UserStore` 등)를 `Arc<dyn ...>`로 받기 때문에
//! 이 컨테이너를 거치지 않고 `main`/테스트에서 명시적으로 조립됩니다.
//!
//! ## 이름 규칙
//!
//! `AddressRepository` 타입은 `"address_repository"`로 등록된 항목과 연결됩니다.
//! 타입 이름에서 `Repository`를 뗀 소문자 이름과 매크로의 `name` 인자가 같아야 합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// `#[repository]` 매크로가 구현하는 트레이트
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;
    fn collection_name(&self) -> &str;
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// inventory로 수집되는 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(RepositoryRegistration);

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> =
    Lazy::new(|| {
        let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
            .map(|registration| (entity_name(registration.name), registration))
            .collect();

        print_cache_initialized("Repository", cache.len());
        cache
    });

/// "address_repository" → "address"
fn entity_name(registration_name: &str) -> String {
    registration_name
        .strip_suffix("_repository")
        .unwrap_or(registration_name)
        .to_string()
}

/// "delivery_account_service::repositories::AddressRepository" → "AddressRepository"
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 전역 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&type_id)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입으로 싱글톤 인스턴스 조회
    ///
    /// 먼저 `set()`으로 등록된 인스턴스를 찾고, 없으면 이름 규칙에 맞는
    /// 리포지토리 등록 정보를 찾아 생성합니다.
    ///
    /// # Panics
    ///
    /// * 등록되지 않은 타입 (인프라 컴포넌트를 `set()` 하지 않은 경우)
    /// * 순환 의존성
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                panic!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                );
            }
        }

        let instance = Self::construct::<T>(type_name);

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        // 생성자 안에서 먼저 등록된 인스턴스가 있으면 그것을 사용
        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
            .clone();
        drop(instances);

        entry.downcast::<T>().unwrap_or(instance)
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let short_name = short_type_name(type_name);

        let Some(entity) = short_name.strip_suffix("Repository") else {
            panic!(
                "Component not found: {}. Register it with #[repository] or ServiceLocator::set()",
                type_name
            );
        };

        let entity = entity.to_lowercase();
        let Some(registration) = REPOSITORY_NAME_CACHE.get(&entity) else {
            panic!("No repository registered for entity: {}", entity);
        };

        match (registration.constructor)().downcast::<Arc<T>>() {
            Ok(instance) => *instance,
            Err(_) => panic!("Type mismatch for repository: {}", registration.name),
        }
    }

    /// 인프라 컴포넌트 수동 등록
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        println!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리를 미리 생성
    ///
    /// `Database`와 `RedisClient`가 먼저 `set()` 되어 있어야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING REPOSITORY REGISTRY");

        let registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = registrations.len();

        print_step_start(1, "Creating Repository instances");
        for registration in registrations {
            print_sub_task(registration.name, "Creating...");
            let _instance = (registration.constructor)();
            print_sub_task(registration.name, "✓ Created");
        }
        print_step_complete(1, "Repository instances created", repo_count);

        print_final_summary(repo_count);
        Ok(())
    }
}
