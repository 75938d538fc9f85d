fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/logo.ico");
        res.set("ProductName", "TechComView");
        res.set("FileDescription", "Telecom infrastructure dashboard");
        res.compile().expect("Failed to compile Windows resources");
    }
}
