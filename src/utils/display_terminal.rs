//! 터미널 출력 포맷팅 유틸리티
//!
//! 레지스트리 초기화와 서버 기동 과정을 운영자가 한눈에 볼 수 있도록 출력합니다.
//! 로그 레벨과 무관하게 항상 표준 출력으로 나갑니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║        🔄 INITIALIZING REPOSITORY REGISTRY       ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!(
        "╔{border}╗\n║{title:^width$}║\n╚{border}╝",
        width = BOX_WIDTH - 1
    )
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 결과 요약
pub fn print_final_summary(repositories: usize) {
    println!();
    print_boxed_title("🎉 REPOSITORY REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repositories);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 서버 기동 시 노출되는 엔드포인트 목록
pub fn print_endpoints(bind_address: &str, endpoints: &[(&str, &str)]) {
    print_boxed_title("🌐 DELIVERY ACCOUNT SERVICE");
    for (method, path) in endpoints {
        println!("   {:<7} http://{}{}", method, bind_address, path);
    }
    println!();
}
