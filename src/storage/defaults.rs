//! Built-in seed data for each collection.
//!
//! These lists are written to the store the first time a collection is read
//! from an empty store, and never again afterwards.

use crate::domain::{BlogPost, Project, Testimonial};

/// Site owner, used as the author of posts written in the editor.
pub const DEFAULT_AUTHOR: &str = "Muluken Ugamo";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Seed projects.
#[must_use]
pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "AI YouTube Thumbnail Generator".to_string(),
            description: "An AI-powered SaaS platform allowing content creators to generate high-CTR thumbnails using text prompts.".to_string(),
            long_description: "AI YouTube Thumbnail Generator lets content creators describe their video concept in text and get high-quality, click-optimized thumbnails in seconds. The platform includes a drag-and-drop editor for final touches, user authentication, and a credit-based payment system.".to_string(),
            tags: strings(&["Next.js", "React", "Gemini API", "Tailwind CSS", "Stripe", "PostgreSQL"]),
            image_url: "https://i.ytimg.com/vi/fFDfd2ZhYjk/maxresdefault.jpg".to_string(),
            repo_url: "https://github.com/Muler8905/AI-YouTube-Thumbnail-Generator".to_string(),
            demo_url: "https://ai-you-tube-thumbnail-generator-indol.vercel.app/".to_string(),
            features: strings(&[
                "Text-to-Image Generation using Gemini Vision capabilities",
                "Real-time credit system integrated with Stripe",
                "Drag-and-drop canvas editor for text overlays",
                "Cloud storage for user asset management",
                "Responsive dashboard for analytics and history",
            ]),
            challenges: Some("Integrating the payment gateway securely while managing asynchronous AI generation tasks. Credits are only deducted by a webhook once an image has been generated successfully.".to_string()),
        },
        Project {
            id: "2".to_string(),
            title: "Event Registration System".to_string(),
            description: "A full-stack event registration system built with React and Node.js, with real-time analytics and an admin dashboard.".to_string(),
            long_description: "A web application that lets organizers create, manage, and monitor events while users browse and register online. It covers event listing, attendee management, online booking, and automated notifications.".to_string(),
            tags: strings(&["TypeScript", "React", "WebSocket", "D3.js", "Node.js", "Redis"]),
            image_url: "https://media.gettyimages.com/id/1641611858/photo/asian-event-participants-guest-registering-at-reception-desk-attending-business-conference.jpg".to_string(),
            repo_url: "https://github.com/Muler8905/Event_Registration_System".to_string(),
            demo_url: "https://muler8905.github.io/Event_Registration_System/".to_string(),
            features: strings(&[
                "User Management: Registration, authentication, and profile management with JWT",
                "Event Management: Create, edit, delete, and manage events",
                "Registration System: Capacity management and status tracking",
                "Admin Dashboard: Real-time analytics and monitoring",
                "Email Notifications: Automated confirmations",
                "Export Functionality: CSV export and data backup",
            ]),
            challenges: None,
        },
        Project {
            id: "3".to_string(),
            title: "Fitness Hub AI".to_string(),
            description: "Personalized workout and diet plan generator using AI to tailor schedules to user biometrics.".to_string(),
            long_description: "Fitness Hub uses generative AI to create personalized fitness regimes that adapt to the user's progress, available equipment, and dietary restrictions.".to_string(),
            tags: strings(&["React", "OpenAI API", "Tailwind", "MongoDB"]),
            image_url: "https://img.freepik.com/free-vector/sport-youtube-thumbnail-template_23-2148599067.jpg".to_string(),
            repo_url: "https://github.com/Muler8905".to_string(),
            demo_url: String::new(),
            features: strings(&[
                "AI-generated weekly workout schedules",
                "Calorie and macro calculator based on biometrics",
                "Progress tracking with visual charts",
                "Social sharing features for accountability",
            ]),
            challenges: None,
        },
    ]
}

/// Seed blog posts.
#[must_use]
pub fn default_blog_posts() -> Vec<BlogPost> {
    vec![BlogPost {
        id: "1".to_string(),
        title: "The Future of Full Stack in 2025".to_string(),
        excerpt: "Exploring how AI and Serverless architectures are redefining the role of a Full Stack Developer.".to_string(),
        content: "The landscape of full stack development keeps shifting.\n\nAI assistants and serverless platforms move the job from wiring infrastructure towards designing products.".to_string(),
        author: DEFAULT_AUTHOR.to_string(),
        date: "Oct 12, 2024".to_string(),
        category: "Tech Trends".to_string(),
        image_url: "https://images.unsplash.com/photo-1555066931-4365d14bab8c?q=80&w=800&auto=format&fit=crop".to_string(),
        read_time: "5 min read".to_string(),
    }]
}

/// Seed testimonials.
#[must_use]
pub fn default_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: "1".to_string(),
            name: "Abebe Kebede".to_string(),
            role: "CEO".to_string(),
            company: Some("Addis Tech Solutions".to_string()),
            text: "Muluken delivered an exceptional e-commerce platform for our business. His understanding of both local market needs and modern web technologies made the project a huge success.".to_string(),
            avatar: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=200&auto=format&fit=crop".to_string(),
        },
        Testimonial {
            id: "2".to_string(),
            name: "Tigist Haile".to_string(),
            role: "Founder".to_string(),
            company: Some("Habesha Digital".to_string()),
            text: "Working with Muluken was a game-changer for our startup. He built our mobile-responsive platform from scratch and it's been running smoothly for months.".to_string(),
            avatar: "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?q=80&w=200&auto=format&fit=crop".to_string(),
        },
        Testimonial {
            id: "3".to_string(),
            name: "Dawit Tesfaye".to_string(),
            role: "Operations Manager".to_string(),
            company: Some("Ethiopian Logistics Hub".to_string()),
            text: "Muluken's work on our inventory management system exceeded expectations. He's professional, responsive, and delivers quality code.".to_string(),
            avatar: "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?q=80&w=200&auto=format&fit=crop".to_string(),
        },
    ]
}
